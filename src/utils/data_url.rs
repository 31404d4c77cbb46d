//! Inline image payloads (`data:image/png;base64,...`).

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::borrow::Cow;
use validator::ValidationError;

pub fn is_image_data_url(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:image/") else {
        return false;
    };
    let Some((media, payload)) = rest.split_once(',') else {
        return false;
    };
    let Some(subtype) = media.strip_suffix(";base64") else {
        return false;
    };
    if subtype.is_empty() || payload.is_empty() {
        return false;
    }

    STANDARD.decode(payload).is_ok()
}

pub fn validate_image(value: &str) -> Result<(), ValidationError> {
    if is_image_data_url(value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_image");
        error.message = Some(Cow::from("Image must be a base64 data URL"));
        Err(error)
    }
}
