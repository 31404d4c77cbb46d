// db/shopdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::{Collection, DBClient, StoreError};
use crate::models::shopmodel::Shop;

#[async_trait]
pub trait ShopExt {
    async fn get_shop(&self, shop_id: Uuid) -> Option<Shop>;

    async fn get_shop_by_owner(&self, owner_id: Uuid) -> Option<Shop>;

    async fn get_shops(&self) -> Vec<Shop>;

    async fn toggle_shop_approval(&self, shop_id: Uuid) -> Result<Option<Shop>, StoreError>;

    async fn update_commission_rate(
        &self,
        shop_id: Uuid,
        commission_rate_bps: i64,
    ) -> Result<Option<Shop>, StoreError>;
}

#[async_trait]
impl ShopExt for DBClient {
    async fn get_shop(&self, shop_id: Uuid) -> Option<Shop> {
        self.read(|store| store.shops.iter().find(|s| s.id == shop_id).cloned())
            .await
    }

    async fn get_shop_by_owner(&self, owner_id: Uuid) -> Option<Shop> {
        self.read(|store| store.shops.iter().find(|s| s.owner_id == owner_id).cloned())
            .await
    }

    async fn get_shops(&self) -> Vec<Shop> {
        self.read(|store| store.shops.clone()).await
    }

    async fn toggle_shop_approval(&self, shop_id: Uuid) -> Result<Option<Shop>, StoreError> {
        self.transaction(&[Collection::Shops], |store| {
            Ok(store.shops.iter_mut().find(|s| s.id == shop_id).map(|shop| {
                shop.is_approved = !shop.is_approved;
                shop.clone()
            }))
        })
        .await
    }

    async fn update_commission_rate(
        &self,
        shop_id: Uuid,
        commission_rate_bps: i64,
    ) -> Result<Option<Shop>, StoreError> {
        self.transaction(&[Collection::Shops], |store| {
            Ok(store.shops.iter_mut().find(|s| s.id == shop_id).map(|shop| {
                shop.commission_rate_bps = commission_rate_bps;
                shop.clone()
            }))
        })
        .await
    }
}
