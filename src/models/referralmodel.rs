use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const WALK_IN_BUYER: &str = "Walk-in Buyer";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    Completed,
    /// Only found in imported records; no operation cancels a sale.
    Cancelled,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReferralSale {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub product_id: Uuid,
    pub referrer_id: Uuid,
    pub buyer_name: String,
    pub sale_amount: i64,
    pub customer_commission_earned: i64,
    pub admin_commission_earned: i64,
    pub lead_id: Option<Uuid>,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Pending,
    Converted,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Lead {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub shop_id: Uuid,
    pub product_id: Uuid,
    pub referral_name: String,
    pub referral_mobile: String,
    pub status: LeadStatus,
    pub sale_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CustomerEarnings {
    pub customer_id: Uuid,
    pub sales: usize,
    pub earned: i64,
}
