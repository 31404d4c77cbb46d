// db/userdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::{Collection, DBClient, StoreError};
use crate::models::usermodel::{User, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_user(&self, user_id: Uuid) -> Option<User>;

    /// First user of `role` whose sign-in identifier matches exactly.
    async fn get_user_by_identifier(&self, role: UserRole, identifier: &str) -> Option<User>;

    async fn get_users(&self) -> Vec<User>;

    async fn get_shop_customers(&self, shop_id: Uuid) -> Vec<User>;

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<Option<User>, StoreError>;

    async fn update_user_shop(
        &self,
        user_id: Uuid,
        shop_id: Uuid,
    ) -> Result<Option<User>, StoreError>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(&self, user_id: Uuid) -> Option<User> {
        self.read(|store| store.users.iter().find(|u| u.id == user_id).cloned())
            .await
    }

    async fn get_user_by_identifier(&self, role: UserRole, identifier: &str) -> Option<User> {
        self.read(|store| {
            store
                .users
                .iter()
                .find(|u| u.role == role && u.login_identifier() == Some(identifier))
                .cloned()
        })
        .await
    }

    async fn get_users(&self) -> Vec<User> {
        self.read(|store| store.users.clone()).await
    }

    async fn get_shop_customers(&self, shop_id: Uuid) -> Vec<User> {
        self.read(|store| {
            store
                .users
                .iter()
                .filter(|u| u.role == UserRole::Customer && u.shop_id == Some(shop_id))
                .cloned()
                .collect()
        })
        .await
    }

    async fn update_user_password(
        &self,
        user_id: Uuid,
        password: String,
    ) -> Result<Option<User>, StoreError> {
        self.transaction(&[Collection::Users], |store| {
            Ok(store.users.iter_mut().find(|u| u.id == user_id).map(|user| {
                user.password = Some(password);
                user.clone()
            }))
        })
        .await
    }

    async fn update_user_shop(
        &self,
        user_id: Uuid,
        shop_id: Uuid,
    ) -> Result<Option<User>, StoreError> {
        self.transaction(&[Collection::Users], |store| {
            Ok(store.users.iter_mut().find(|u| u.id == user_id).map(|user| {
                user.shop_id = Some(shop_id);
                user.clone()
            }))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: UserRole, mobile: &str, email: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            role,
            mobile: Some(mobile.to_string()),
            email: email.map(str::to_string),
            password: None,
            shop_id: None,
            referral_code: None,
            referred_by: None,
            created_at: Utc::now(),
        }
    }

    async fn insert(db: &DBClient, user: User) -> User {
        db.transaction(&[Collection::Users], |store| {
            store.users.push(user.clone());
            Ok::<_, StoreError>(user)
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn identifier_lookup_is_scoped_by_role() {
        let db = DBClient::in_memory();
        let owner = insert(&db, user(UserRole::ShopOwner, "8888888888", None)).await;
        let customer = insert(&db, user(UserRole::Customer, "8888888888", None)).await;

        let found = db
            .get_user_by_identifier(UserRole::ShopOwner, "8888888888")
            .await
            .unwrap();
        assert_eq!(found.id, owner.id);

        let found = db
            .get_user_by_identifier(UserRole::Customer, "8888888888")
            .await
            .unwrap();
        assert_eq!(found.id, customer.id);
    }

    #[tokio::test]
    async fn admin_is_found_by_email_not_mobile() {
        let db = DBClient::in_memory();
        insert(&db, user(UserRole::Admin, "9999999999", Some("admin@rfm.local"))).await;

        assert!(db
            .get_user_by_identifier(UserRole::Admin, "admin@rfm.local")
            .await
            .is_some());
        assert!(db
            .get_user_by_identifier(UserRole::Admin, "9999999999")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn password_update_on_missing_user_is_none() {
        let db = DBClient::in_memory();
        let updated = db
            .update_user_password(Uuid::new_v4(), "hash".to_string())
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
