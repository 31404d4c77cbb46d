// service/shop_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::error::ServiceError;
use crate::{
    db::{
        db::{Collection, DBClient},
        shopdb::ShopExt,
    },
    dtos::userdtos::RegisterShopDto,
    models::{
        shopmodel::{Shop, ShopDocuments, MAX_COMMISSION_RATE_BPS, MIN_COMMISSION_RATE_BPS},
        usermodel::{User, UserRole},
    },
    utils::password,
};

#[derive(Debug, Clone)]
pub struct ShopService {
    db_client: Arc<DBClient>,
    default_commission_rate_bps: i64,
}

impl ShopService {
    pub fn new(db_client: Arc<DBClient>, default_commission_rate_bps: i64) -> Self {
        Self {
            db_client,
            default_commission_rate_bps,
        }
    }

    /// Creates the owner account and its unapproved shop together.
    pub async fn register_shop(&self, body: RegisterShopDto) -> Result<(User, Shop), ServiceError> {
        let hashed = password::hash(body.password.as_str())
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let rate = self.default_commission_rate_bps;

        let (owner, shop) = self
            .db_client
            .transaction(&[Collection::Users, Collection::Shops], |store| {
                if store.users.iter().any(|u| {
                    u.role == UserRole::ShopOwner && u.mobile.as_deref() == Some(body.mobile.as_str())
                }) {
                    return Err(ServiceError::MobileTaken(body.mobile));
                }

                let now = Utc::now();
                let owner_id = Uuid::new_v4();
                let shop_id = Uuid::new_v4();

                let owner = User {
                    id: owner_id,
                    name: body.owner_name,
                    role: UserRole::ShopOwner,
                    mobile: Some(body.mobile),
                    email: None,
                    password: Some(hashed),
                    shop_id: Some(shop_id),
                    referral_code: None,
                    referred_by: None,
                    created_at: now,
                };

                let shop = Shop {
                    id: shop_id,
                    owner_id,
                    shop_name: body.shop_name,
                    address: body.address,
                    gst_number: body.gst_number.to_uppercase(),
                    is_approved: false,
                    commission_rate_bps: rate,
                    documents: ShopDocuments {
                        gst_certificate_photo: body.gst_certificate_photo,
                        shop_photo: body.shop_photo,
                        owner_selfie_photo: body.owner_selfie_photo,
                    },
                    logo: body.logo,
                    created_at: now,
                };

                store.users.push(owner.clone());
                store.shops.push(shop.clone());
                Ok((owner, shop))
            })
            .await?;

        tracing::info!("Shop {} registered by {}, awaiting approval", shop.id, owner.id);
        Ok((owner, shop))
    }

    pub async fn get_shop(&self, shop_id: Uuid) -> Result<Shop, ServiceError> {
        self.db_client
            .get_shop(shop_id)
            .await
            .ok_or(ServiceError::ShopNotFound(shop_id))
    }

    pub async fn shop_for_owner(&self, owner: &User) -> Result<Shop, ServiceError> {
        self.db_client
            .get_shop_by_owner(owner.id)
            .await
            .ok_or(ServiceError::NoShopForUser(owner.id))
    }

    /// Same as `shop_for_owner`, refusing shops the admin has not approved.
    pub async fn approved_shop_for_owner(&self, owner: &User) -> Result<Shop, ServiceError> {
        let shop = self.shop_for_owner(owner).await?;
        if !shop.is_approved {
            return Err(ServiceError::ShopNotApproved(shop.id));
        }
        Ok(shop)
    }

    pub async fn toggle_approval(&self, shop_id: Uuid) -> Result<Shop, ServiceError> {
        let shop = self
            .db_client
            .toggle_shop_approval(shop_id)
            .await?
            .ok_or(ServiceError::ShopNotFound(shop_id))?;

        tracing::info!(
            "Shop {} is now {}",
            shop.id,
            if shop.is_approved { "approved" } else { "blocked" }
        );
        Ok(shop)
    }

    pub async fn set_commission_rate(&self, shop_id: Uuid, rate_bps: i64) -> Result<Shop, ServiceError> {
        if !(MIN_COMMISSION_RATE_BPS..=MAX_COMMISSION_RATE_BPS).contains(&rate_bps) {
            return Err(ServiceError::InvalidCommissionRate(rate_bps));
        }

        let shop = self
            .db_client
            .update_commission_rate(shop_id, rate_bps)
            .await?
            .ok_or(ServiceError::ShopNotFound(shop_id))?;

        tracing::info!("Commission rate of shop {} set to {} bps", shop.id, rate_bps);
        Ok(shop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn registration(mobile: &str) -> RegisterShopDto {
        RegisterShopDto {
            owner_name: "Rahul Sharma".to_string(),
            shop_name: "Sharma Mobiles".to_string(),
            mobile: mobile.to_string(),
            password: "shop@123".to_string(),
            address: "MG Road, Pune".to_string(),
            gst_number: "27aapfu0939f1zv".to_string(),
            gst_certificate_photo: PNG.to_string(),
            shop_photo: PNG.to_string(),
            owner_selfie_photo: PNG.to_string(),
            logo: None,
        }
    }

    fn service() -> ShopService {
        ShopService::new(Arc::new(DBClient::in_memory()), 500)
    }

    #[tokio::test]
    async fn registered_shop_starts_unapproved() {
        let service = service();
        let (owner, shop) = service.register_shop(registration("9876543210")).await.unwrap();

        assert!(!shop.is_approved);
        assert_eq!(shop.commission_rate_bps, 500);
        assert_eq!(shop.owner_id, owner.id);
        assert_eq!(owner.shop_id, Some(shop.id));
        assert_eq!(shop.gst_number, "27AAPFU0939F1ZV");
        assert_ne!(owner.password.as_deref(), Some("shop@123"));

        let err = service.approved_shop_for_owner(&owner).await.unwrap_err();
        assert!(matches!(err, ServiceError::ShopNotApproved(_)));
    }

    #[tokio::test]
    async fn duplicate_owner_mobile_is_rejected() {
        let service = service();
        service.register_shop(registration("9876543210")).await.unwrap();

        let err = service
            .register_shop(registration("9876543210"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::MobileTaken(_)));
        assert_eq!(service.db_client.get_shops().await.len(), 1);
    }

    #[tokio::test]
    async fn toggling_twice_restores_approval() {
        let service = service();
        let (owner, shop) = service.register_shop(registration("9876543210")).await.unwrap();

        assert!(service.toggle_approval(shop.id).await.unwrap().is_approved);
        assert!(service.approved_shop_for_owner(&owner).await.is_ok());
        assert!(!service.toggle_approval(shop.id).await.unwrap().is_approved);
    }

    #[tokio::test]
    async fn commission_rate_must_stay_in_range() {
        let service = service();
        let (_, shop) = service.register_shop(registration("9876543210")).await.unwrap();

        assert_eq!(
            service.set_commission_rate(shop.id, 1_000).await.unwrap().commission_rate_bps,
            1_000
        );
        assert!(matches!(
            service.set_commission_rate(shop.id, 1_100).await,
            Err(ServiceError::InvalidCommissionRate(1_100))
        ));
        assert!(matches!(
            service.set_commission_rate(shop.id, 50).await,
            Err(ServiceError::InvalidCommissionRate(50))
        ));
    }
}
