use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::supportmodel::ComplaintStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateComplaintDto {
    #[validate(length(min = 1, max = 200, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateComplaintStatusDto {
    pub status: ComplaintStatus,
}
