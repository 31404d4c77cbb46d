use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Pending,
    Resolved,
    Dismissed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Complaint {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub shop_id: Uuid,
    pub subject: String,
    pub message: String,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeStatus {
    Unread,
    Read,
}

/// Message from the platform admin to a shop.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminNotice {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub title: String,
    pub message: String,
    pub status: NoticeStatus,
    pub created_at: DateTime<Utc>,
}
