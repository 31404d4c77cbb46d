use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{dtos::userdtos::validate_mobile, utils::data_url::validate_image};

/// Only a shallow shape check; UPI handles are `name@bank`.
pub fn validate_upi(upi_id: &str) -> Result<(), ValidationError> {
    if upi_id.contains('@') {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_upi");
        error.message = Some(Cow::from("Please enter a valid UPI ID"));
        Err(error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WithdrawalRequestDto {
    #[validate(custom = "validate_upi")]
    pub upi_id: String,

    /// Rupees; the whole withdrawable balance when omitted.
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PaymentProofDto {
    #[validate(length(min = 1, max = 100))]
    pub transaction_id: Option<String>,

    #[validate(custom = "validate_image")]
    pub screenshot: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitLeadDto {
    pub product_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Referral name is required"))]
    pub referral_name: String,

    #[validate(custom = "validate_mobile")]
    pub referral_mobile: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upi_needs_an_at_sign() {
        let dto = WithdrawalRequestDto {
            upi_id: "amit.ybl".to_string(),
            amount: None,
        };
        assert!(dto.validate().is_err());

        let dto = WithdrawalRequestDto {
            upi_id: "amit@ybl".to_string(),
            amount: Some(150.0),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn proof_screenshot_must_be_an_image() {
        let dto = PaymentProofDto {
            transaction_id: None,
            screenshot: Some("https://picsum.photos/400/600".to_string()),
        };
        assert!(dto.validate().is_err());
    }
}
