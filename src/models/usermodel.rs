//1
use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    ShopOwner,
    Customer,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::ShopOwner => "shop_owner",
            UserRole::Customer => "customer",
        }
    }

    /// Admins and shop owners sign in with a password, customers by mobile only.
    pub fn requires_password(&self) -> bool {
        !matches!(self, UserRole::Customer)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: UserRole,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    // Customers and shop owners only
    pub shop_id: Option<Uuid>,
    pub referral_code: Option<String>,
    pub referred_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The identifier a user signs in with for the given role.
    pub fn login_identifier(&self) -> Option<&str> {
        match self.role {
            UserRole::Admin => self.email.as_deref(),
            UserRole::ShopOwner | UserRole::Customer => self.mobile.as_deref(),
        }
    }
}
