// models/walletmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayoutKind {
    /// Customer withdrawing referral commission from their shop.
    CustomerPayout,
    /// Shop settling the platform's share with the admin.
    ShopToAdminPayout,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PayoutRequest {
    pub id: Uuid,
    pub kind: PayoutKind,
    pub user_id: Uuid,
    pub shop_id: Uuid,
    pub amount: i64,
    pub upi_id: String,
    pub status: TransactionStatus,
    pub screenshot: Option<String>,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl PayoutRequest {
    pub fn has_proof(&self) -> bool {
        self.screenshot.is_some() || self.transaction_id.is_some()
    }
}

/// Derived withdrawal position of a single customer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct CustomerBalance {
    pub earned: i64,
    pub paid: i64,
    pub pending: i64,
    /// Earned minus paid only; can over-state what is still withdrawable.
    pub settled: i64,
    /// Earned minus paid and pending.
    pub withdrawable: i64,
}

/// Derived position of a shop towards the platform.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShopAdminBalance {
    pub accrued: i64,
    pub paid: i64,
    pub pending: i64,
    pub outstanding: i64,
}
