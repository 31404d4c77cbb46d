use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    db::db::StoreError,
    error::HttpError,
    models::{
        referralmodel::LeadStatus, supportmodel::ComplaintStatus,
        walletmodels::TransactionStatus,
    },
    utils::currency::CurrencyError,
};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Shop {0} not found")]
    ShopNotFound(Uuid),

    #[error("No shop registered for user {0}")]
    NoShopForUser(Uuid),

    #[error("Product {0} not found")]
    ProductNotFound(Uuid),

    #[error("Lead {0} not found")]
    LeadNotFound(Uuid),

    #[error("Payout request {0} not found")]
    PayoutNotFound(Uuid),

    #[error("Complaint {0} not found")]
    ComplaintNotFound(Uuid),

    #[error("Notice {0} not found")]
    NoticeNotFound(Uuid),

    #[error("Shop {0} is awaiting admin approval")]
    ShopNotApproved(Uuid),

    #[error("User {0} is not authorized to act on shop {1}")]
    UnauthorizedShopAccess(Uuid, Uuid),

    #[error("Mobile number {0} is already registered")]
    MobileTaken(String),

    #[error("Lead {0} is already {1:?}")]
    InvalidLeadStatus(Uuid, LeadStatus),

    #[error("Payout request {0} is already {1:?}")]
    InvalidPayoutStatus(Uuid, TransactionStatus),

    #[error("Complaint {0} is already {1:?}")]
    InvalidComplaintStatus(Uuid, ComplaintStatus),

    #[error("Minimum withdrawal amount is {minimum} paise, requested {amount}")]
    BelowMinimumWithdrawal { amount: i64, minimum: i64 },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("No commission owed to the admin yet")]
    NothingOwed,

    #[error("A payment screenshot or transaction id is required")]
    MissingPaymentProof,

    #[error("Commission rate {0} bps is outside the allowed range")]
    InvalidCommissionRate(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Amount(#[from] CurrencyError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UserNotFound(_)
            | ServiceError::ShopNotFound(_)
            | ServiceError::NoShopForUser(_)
            | ServiceError::ProductNotFound(_)
            | ServiceError::LeadNotFound(_)
            | ServiceError::PayoutNotFound(_)
            | ServiceError::ComplaintNotFound(_)
            | ServiceError::NoticeNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::ShopNotApproved(_) | ServiceError::UnauthorizedShopAccess(_, _) => {
                StatusCode::FORBIDDEN
            }

            ServiceError::MobileTaken(_)
            | ServiceError::InvalidLeadStatus(_, _)
            | ServiceError::InvalidPayoutStatus(_, _)
            | ServiceError::InvalidComplaintStatus(_, _) => StatusCode::CONFLICT,

            ServiceError::BelowMinimumWithdrawal { .. }
            | ServiceError::InsufficientBalance { .. }
            | ServiceError::NothingOwed
            | ServiceError::MissingPaymentProof
            | ServiceError::InvalidCommissionRate(_)
            | ServiceError::Validation(_)
            | ServiceError::Amount(_) => StatusCode::BAD_REQUEST,

            ServiceError::Store(_) | ServiceError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = error.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Service failure: {}", error);
        }
        HttpError::new(error.to_string(), status)
    }
}
