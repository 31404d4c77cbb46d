// service/user_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{
    error::ServiceError,
    referral::{fallback_referral_code, generate_referral_code},
};
use crate::{
    config::Config,
    db::{
        db::{Collection, DBClient, Store},
        shopdb::ShopExt,
        userdb::UserExt,
    },
    models::usermodel::{User, UserRole},
    utils::password,
};

const REFERRAL_CODE_ATTEMPTS: usize = 32;

fn code_taken(store: &Store, code: &str) -> bool {
    store
        .users
        .iter()
        .any(|u| u.referral_code.as_deref() == Some(code))
}

/// Draws a few short codes, then falls back to one built from `user_id`.
fn unique_referral_code(store: &Store, name: &str, user_id: Uuid) -> String {
    (0..REFERRAL_CODE_ATTEMPTS)
        .map(|_| generate_referral_code(name))
        .find(|code| !code_taken(store, code))
        .unwrap_or_else(|| fallback_referral_code(name, user_id))
}

fn mobile_taken(store: &Store, role: UserRole, mobile: &str) -> bool {
    store
        .users
        .iter()
        .any(|u| u.role == role && u.mobile.as_deref() == Some(mobile))
}

fn hash_password(raw: &str) -> Result<String, ServiceError> {
    password::hash(raw).map_err(|e| ServiceError::Validation(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct UserService {
    db_client: Arc<DBClient>,
}

impl UserService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Creates the platform administrator from config unless one exists.
    pub async fn seed_admin(&self, config: &Config) -> Result<Option<User>, ServiceError> {
        let hashed = hash_password(&config.admin_password)?;
        let email = config.admin_email.clone();

        let seeded = self
            .db_client
            .transaction(&[Collection::Users], |store| {
                if store.users.iter().any(|u| u.role == UserRole::Admin) {
                    return Ok::<_, ServiceError>(None);
                }

                let admin = User {
                    id: Uuid::new_v4(),
                    name: "Platform Admin".to_string(),
                    role: UserRole::Admin,
                    mobile: None,
                    email: Some(email),
                    password: Some(hashed),
                    shop_id: None,
                    referral_code: None,
                    referred_by: None,
                    created_at: Utc::now(),
                };
                store.users.push(admin.clone());
                Ok(Some(admin))
            })
            .await?;

        if let Some(admin) = &seeded {
            tracing::info!("Seeded admin account {}", admin.id);
        }
        Ok(seeded)
    }

    /// Registers a customer of `shop_id`, optionally invited by another customer.
    pub async fn create_customer(
        &self,
        shop_id: Uuid,
        name: String,
        mobile: String,
        referred_by: Option<Uuid>,
    ) -> Result<User, ServiceError> {
        let customer = self
            .db_client
            .transaction(&[Collection::Users], |store| {
                if mobile_taken(store, UserRole::Customer, &mobile) {
                    return Err(ServiceError::MobileTaken(mobile));
                }

                let id = Uuid::new_v4();
                let customer = User {
                    id,
                    referral_code: Some(unique_referral_code(store, &name, id)),
                    name,
                    role: UserRole::Customer,
                    mobile: Some(mobile),
                    email: None,
                    password: None,
                    shop_id: Some(shop_id),
                    referred_by,
                    created_at: Utc::now(),
                };
                store.users.push(customer.clone());
                Ok(customer)
            })
            .await?;

        tracing::info!("Customer {} added to shop {}", customer.id, shop_id);
        Ok(customer)
    }

    pub async fn invite_friend(
        &self,
        inviter: &User,
        name: String,
        mobile: String,
    ) -> Result<User, ServiceError> {
        let shop_id = inviter
            .shop_id
            .ok_or(ServiceError::NoShopForUser(inviter.id))?;

        self.create_customer(shop_id, name, mobile, Some(inviter.id))
            .await
    }

    pub async fn reset_password(
        &self,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<User, ServiceError> {
        let user = self
            .db_client
            .get_user(user_id)
            .await
            .ok_or(ServiceError::UserNotFound(user_id))?;

        if !user.role.requires_password() {
            return Err(ServiceError::Validation(
                "Customers sign in without a password".to_string(),
            ));
        }

        let hashed = hash_password(new_password)?;
        let updated = self
            .db_client
            .update_user_password(user_id, hashed)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        tracing::info!("Password reset for user {}", user_id);
        Ok(updated)
    }

    /// Moves a customer to another shop.
    pub async fn reassign_shop(&self, user_id: Uuid, shop_id: Uuid) -> Result<User, ServiceError> {
        let user = self
            .db_client
            .get_user(user_id)
            .await
            .ok_or(ServiceError::UserNotFound(user_id))?;

        if user.role != UserRole::Customer {
            return Err(ServiceError::Validation(
                "Only customers can be moved between shops".to_string(),
            ));
        }

        self.db_client
            .get_shop(shop_id)
            .await
            .ok_or(ServiceError::ShopNotFound(shop_id))?;

        let updated = self
            .db_client
            .update_user_shop(user_id, shop_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        tracing::info!("Customer {} reassigned to shop {}", user_id, shop_id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> UserService {
        UserService::new(Arc::new(DBClient::in_memory()))
    }

    #[tokio::test]
    async fn admin_is_seeded_once() {
        let service = service();
        let config = Config::for_tests();

        let admin = service.seed_admin(&config).await.unwrap().unwrap();
        assert_eq!(admin.email.as_deref(), Some("admin@rfm.local"));
        assert!(password::compare("Admin@123", admin.password.as_deref().unwrap()).unwrap());

        assert!(service.seed_admin(&config).await.unwrap().is_none());
        let admins = service
            .db_client
            .read(|store| store.users.iter().filter(|u| u.role == UserRole::Admin).count())
            .await;
        assert_eq!(admins, 1);
    }

    #[tokio::test]
    async fn customers_get_unique_codes_and_mobiles() {
        let service = service();
        let shop_id = Uuid::new_v4();

        let amit = service
            .create_customer(shop_id, "Amit".to_string(), "9000000001".to_string(), None)
            .await
            .unwrap();
        assert!(amit.referral_code.as_deref().unwrap().starts_with("REF-AMI"));
        assert_eq!(amit.shop_id, Some(shop_id));

        let err = service
            .create_customer(shop_id, "Other".to_string(), "9000000001".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::MobileTaken(_)));
    }

    #[tokio::test]
    async fn crowded_code_space_still_yields_a_code() {
        let service = service();
        let shop_id = Uuid::new_v4();
        service
            .db_client
            .transaction(&[Collection::Users], |store| {
                for n in 0..10_000 {
                    store.users.push(User {
                        id: Uuid::new_v4(),
                        name: "अमित".to_string(),
                        role: UserRole::Customer,
                        mobile: Some(format!("8{:09}", n)),
                        email: None,
                        password: None,
                        shop_id: Some(shop_id),
                        referral_code: Some(format!("REF-{:04}", n)),
                        referred_by: None,
                        created_at: Utc::now(),
                    });
                }
                Ok::<_, ServiceError>(())
            })
            .await
            .unwrap();

        let customer = service
            .create_customer(shop_id, "अमित".to_string(), "9000000001".to_string(), None)
            .await
            .unwrap();
        let code = customer.referral_code.unwrap();
        assert_eq!(code, fallback_referral_code("अमित", customer.id));
    }

    #[tokio::test]
    async fn invited_friend_joins_inviters_shop() {
        let service = service();
        let shop_id = Uuid::new_v4();
        let inviter = service
            .create_customer(shop_id, "Amit".to_string(), "9000000001".to_string(), None)
            .await
            .unwrap();

        let friend = service
            .invite_friend(&inviter, "Ravi".to_string(), "9000000002".to_string())
            .await
            .unwrap();
        assert_eq!(friend.shop_id, Some(shop_id));
        assert_eq!(friend.referred_by, Some(inviter.id));
    }

    #[tokio::test]
    async fn customers_have_no_password_to_reset() {
        let service = service();
        let customer = service
            .create_customer(Uuid::new_v4(), "Amit".to_string(), "9000000001".to_string(), None)
            .await
            .unwrap();

        let err = service
            .reset_password(customer.id, "secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn reassign_requires_existing_shop() {
        let service = service();
        let customer = service
            .create_customer(Uuid::new_v4(), "Amit".to_string(), "9000000001".to_string(), None)
            .await
            .unwrap();

        let err = service
            .reassign_shop(customer.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ShopNotFound(_)));
    }
}
