use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{models::productmodel::BRANDS, utils::data_url::validate_image};

fn validate_brand(brand: &str) -> Result<(), ValidationError> {
    if BRANDS.contains(&brand) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_brand");
        error.message = Some(Cow::from(format!("Brand must be one of {}", BRANDS.join(", "))));
        Err(error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCommissionRateDto {
    /// Percentage of each commission pool kept by the platform (5.0 = 5%).
    #[validate(range(min = 1.0, max = 10.0, message = "Commission rate must be between 1% and 10%"))]
    pub rate_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,

    #[validate(custom = "validate_brand")]
    pub brand: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    /// Commission pool in rupees.
    #[validate(range(min = 0.0, message = "Commission cannot be negative"))]
    pub commission: f64,

    #[validate(range(min = 0.0))]
    pub down_payment: Option<f64>,

    #[validate(range(min = 0.0))]
    pub emi_amount: Option<f64>,

    #[validate(range(min = 1, max = 60))]
    pub emi_months: Option<i32>,

    #[validate(custom = "validate_image")]
    pub front_image: Option<String>,

    #[validate(custom = "validate_image")]
    pub back_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordSaleDto {
    pub product_id: Uuid,
    pub referrer_id: Uuid,

    #[validate(length(min = 1, max = 100))]
    pub buyer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNoticeDto {
    pub shop_id: Uuid,

    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,
}
