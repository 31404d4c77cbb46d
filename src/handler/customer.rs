use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use validator::Validate;

use crate::{
    dtos::{
        commissiondtos::{SubmitLeadDto, WithdrawalRequestDto},
        supportdtos::CreateComplaintDto,
        userdtos::{AddCustomerDto, FilterUserDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{shopmodel::ShopSummary, usermodel::User},
    service::{error::ServiceError, referral::generate_referral_link},
    AppState,
};

pub fn customer_handler() -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/products", get(get_products))
        .route("/withdraw", post(request_withdrawal))
        .route("/invite", post(invite_friend))
        .route("/leads", get(get_leads).post(submit_lead))
        .route("/complaints", get(get_complaints).post(file_complaint))
}

fn shop_of(user: &User) -> Result<uuid::Uuid, HttpError> {
    user.shop_id
        .ok_or_else(|| ServiceError::NoShopForUser(user.id).into())
}

pub async fn get_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let customer = &user.user;
    let shop = app_state.shop_service.get_shop(shop_of(customer)?).await?;

    let balance = app_state.balance_service.customer_balance(customer.id).await;
    let sales = app_state.sale_service.customer_sales(customer.id).await;
    let payouts = app_state.payout_service.customer_payouts(customer.id).await;
    let referral_link = customer
        .referral_code
        .as_deref()
        .map(|code| generate_referral_link(&app_state.env.app_url, code));

    Ok(Json(json!({
        "status": "success",
        "data": {
            "user": FilterUserDto::filter_user(customer),
            "shop": ShopSummary::from(&shop),
            "balance": balance,
            "min_withdrawal": app_state.env.min_withdrawal_paise,
            "referral_link": referral_link,
            "sales": sales,
            "payouts": payouts
        }
    })))
}

pub async fn get_products(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let shop_id = shop_of(&user.user)?;
    let products = app_state.product_service.list_products(shop_id).await;

    Ok(Json(json!({
        "status": "success",
        "data": products
    })))
}

pub async fn request_withdrawal(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<WithdrawalRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let payout = app_state
        .payout_service
        .request_customer_payout(&user.user, body.upi_id, body.amount)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Withdrawal request sent to your shop",
            "data": payout
        })),
    ))
}

pub async fn invite_friend(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<AddCustomerDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let friend = app_state
        .user_service
        .invite_friend(&user.user, body.name.trim().to_string(), body.mobile)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": FilterUserDto::filter_user(&friend)
        })),
    ))
}

pub async fn get_leads(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let leads = app_state.sale_service.customer_leads(user.user.id).await;

    Ok(Json(json!({
        "status": "success",
        "data": leads
    })))
}

pub async fn submit_lead(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<SubmitLeadDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let lead = app_state.sale_service.submit_lead(&user.user, body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": lead
        })),
    ))
}

pub async fn get_complaints(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let complaints = app_state
        .complaint_service
        .customer_complaints(user.user.id)
        .await;

    Ok(Json(json!({
        "status": "success",
        "data": complaints
    })))
}

pub async fn file_complaint(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateComplaintDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let complaint = app_state
        .complaint_service
        .file_complaint(&user.user, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": complaint
        })),
    ))
}
