pub mod balance_service;
pub mod commission;
pub mod complaint_service;
pub mod error;
pub mod payout_service;
pub mod product_service;
pub mod referral;
pub mod sale_service;
pub mod shop_service;
pub mod user_service;
