use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const BRANDS: [&str; 7] = ["Apple", "Samsung", "Realme", "Oppo", "Vivo", "Xiaomi", "OnePlus"];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub name: String,
    pub brand: String,
    pub price: i64,
    /// Flat commission pool split between the platform and the referrer.
    pub customer_commission: i64,
    pub down_payment: Option<i64>,
    pub emi_amount: Option<i64>,
    pub emi_months: Option<i32>,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
