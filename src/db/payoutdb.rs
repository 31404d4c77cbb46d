// db/payoutdb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::walletmodels::{PayoutKind, PayoutRequest};

#[async_trait]
pub trait PayoutExt {
    async fn get_payouts_by_kind(&self, kind: PayoutKind) -> Vec<PayoutRequest>;

    async fn get_shop_payouts(&self, shop_id: Uuid) -> Vec<PayoutRequest>;

    async fn get_user_payouts(&self, user_id: Uuid, kind: PayoutKind) -> Vec<PayoutRequest>;
}

#[async_trait]
impl PayoutExt for DBClient {
    async fn get_payouts_by_kind(&self, kind: PayoutKind) -> Vec<PayoutRequest> {
        self.read(|store| {
            store
                .payouts
                .iter()
                .filter(|p| p.kind == kind)
                .cloned()
                .collect()
        })
        .await
    }

    async fn get_shop_payouts(&self, shop_id: Uuid) -> Vec<PayoutRequest> {
        self.read(|store| {
            store
                .payouts
                .iter()
                .filter(|p| p.shop_id == shop_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn get_user_payouts(&self, user_id: Uuid, kind: PayoutKind) -> Vec<PayoutRequest> {
        self.read(|store| {
            store
                .payouts
                .iter()
                .filter(|p| p.user_id == user_id && p.kind == kind)
                .cloned()
                .collect()
        })
        .await
    }
}
