// db/referraldb.rs
use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::referralmodel::{Lead, ReferralSale};

#[async_trait]
pub trait ReferralExt {
    async fn get_shop_sales(&self, shop_id: Uuid) -> Vec<ReferralSale>;

    async fn get_referrer_sales(&self, referrer_id: Uuid) -> Vec<ReferralSale>;

    async fn get_shop_leads(&self, shop_id: Uuid) -> Vec<Lead>;

    async fn get_customer_leads(&self, customer_id: Uuid) -> Vec<Lead>;
}

#[async_trait]
impl ReferralExt for DBClient {
    async fn get_shop_sales(&self, shop_id: Uuid) -> Vec<ReferralSale> {
        self.read(|store| {
            store
                .sales
                .iter()
                .filter(|s| s.shop_id == shop_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn get_referrer_sales(&self, referrer_id: Uuid) -> Vec<ReferralSale> {
        self.read(|store| {
            store
                .sales
                .iter()
                .filter(|s| s.referrer_id == referrer_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn get_shop_leads(&self, shop_id: Uuid) -> Vec<Lead> {
        self.read(|store| {
            store
                .leads
                .iter()
                .filter(|l| l.shop_id == shop_id)
                .cloned()
                .collect()
        })
        .await
    }

    async fn get_customer_leads(&self, customer_id: Uuid) -> Vec<Lead> {
        self.read(|store| {
            store
                .leads
                .iter()
                .filter(|l| l.customer_id == customer_id)
                .cloned()
                .collect()
        })
        .await
    }
}
