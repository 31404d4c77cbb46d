use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest and highest platform share of a product's commission pool.
pub const MIN_COMMISSION_RATE_BPS: i64 = 100;
pub const MAX_COMMISSION_RATE_BPS: i64 = 1_000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShopDocuments {
    pub gst_certificate_photo: String,
    pub shop_photo: String,
    pub owner_selfie_photo: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Shop {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub shop_name: String,
    pub address: String,
    pub gst_number: String,
    pub is_approved: bool,
    /// Basis points of every commission pool retained by the platform.
    pub commission_rate_bps: i64,
    pub documents: ShopDocuments,
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShopSummary {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub shop_name: String,
    pub address: String,
    pub gst_number: String,
    pub is_approved: bool,
    pub commission_rate_bps: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Shop> for ShopSummary {
    fn from(shop: &Shop) -> Self {
        ShopSummary {
            id: shop.id,
            owner_id: shop.owner_id,
            shop_name: shop.shop_name.clone(),
            address: shop.address.clone(),
            gst_number: shop.gst_number.clone(),
            is_approved: shop.is_approved,
            commission_rate_bps: shop.commission_rate_bps,
            created_at: shop.created_at,
        }
    }
}
