//3
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{models::usermodel::*, utils::data_url::validate_image};

pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    let mobile_regex =
        Regex::new(r"^[0-9]{10}$").map_err(|_| ValidationError::new("Invalid mobile regex"))?;

    if !mobile_regex.is_match(mobile) {
        let mut error = ValidationError::new("invalid_mobile");
        error.message = Some(Cow::from("Mobile number must be exactly 10 digits"));
        return Err(error);
    }
    Ok(())
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    /// Email for the admin, mobile number for everyone else.
    #[validate(length(min = 1, message = "Identifier is required"))]
    pub identifier: String,

    pub role: UserRole,

    pub password: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterShopDto {
    #[validate(length(min = 1, max = 100, message = "Owner name is required"))]
    pub owner_name: String,

    #[validate(length(min = 1, max = 100, message = "Shop name is required"))]
    pub shop_name: String,

    #[validate(custom = "validate_mobile")]
    pub mobile: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,

    #[validate(length(min = 1, max = 500, message = "Address is required"))]
    pub address: String,

    #[validate(length(equal = 15, message = "GST number must be 15 characters"))]
    pub gst_number: String,

    #[validate(custom = "validate_image")]
    pub gst_certificate_photo: String,

    #[validate(custom = "validate_image")]
    pub shop_photo: String,

    #[validate(custom = "validate_image")]
    pub owner_selfie_photo: String,

    #[validate(custom = "validate_image")]
    pub logo: Option<String>,
}

/// A customer id created by a shop or invited by another customer.
#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct AddCustomerDto {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(custom = "validate_mobile")]
    pub mobile: String,
}

#[derive(Debug, Validate, Default, Clone, Serialize, Deserialize)]
pub struct ResetPasswordDto {
    #[validate(
        length(min = 1, message = "New password is required."),
        length(min = 6, message = "new password must be at least 6 characters")
    )]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReassignShopDto {
    pub shop_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    pub name: String,
    pub role: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub shop_id: Option<Uuid>,
    pub referral_code: Option<String>,
    pub referred_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl FilterUserDto {
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_string(),
            name: user.name.to_owned(),
            role: user.role.to_str().to_string(),
            mobile: user.mobile.clone(),
            email: user.email.clone(),
            shop_id: user.shop_id,
            referral_code: user.referral_code.clone(),
            referred_by: user.referred_by,
            created_at: user.created_at,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub token: String,
    pub user: FilterUserDto,
}

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_dto() -> RegisterShopDto {
        RegisterShopDto {
            owner_name: "Rajesh Kumar".to_string(),
            shop_name: "Elite Mobiles".to_string(),
            mobile: "8888888888".to_string(),
            password: "Shop@123".to_string(),
            address: "123 Main St, Tech City".to_string(),
            gst_number: "22AAAAA0000A1Z5".to_string(),
            gst_certificate_photo: "data:image/png;base64,aGVsbG8=".to_string(),
            shop_photo: "data:image/png;base64,aGVsbG8=".to_string(),
            owner_selfie_photo: "data:image/png;base64,aGVsbG8=".to_string(),
            logo: None,
        }
    }

    #[test]
    fn mobile_must_be_ten_digits() {
        assert!(validate_mobile("8888888888").is_ok());
        assert!(validate_mobile("88888").is_err());
        assert!(validate_mobile("88888888ab").is_err());
    }

    #[test]
    fn complete_registration_is_valid() {
        assert!(register_dto().validate().is_ok());
    }

    #[test]
    fn missing_document_fails_validation() {
        let mut dto = register_dto();
        dto.shop_photo = String::new();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("shop_photo"));
    }

    #[test]
    fn filtered_user_hides_password() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Rajesh".to_string(),
            role: UserRole::ShopOwner,
            mobile: Some("8888888888".to_string()),
            email: None,
            password: Some("hash".to_string()),
            shop_id: None,
            referral_code: None,
            referred_by: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(FilterUserDto::filter_user(&user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "shop_owner");
    }
}
