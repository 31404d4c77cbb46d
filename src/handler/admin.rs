use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{shopdb::ShopExt, userdb::UserExt},
    dtos::{
        commissiondtos::PaymentProofDto,
        shopdtos::{CreateNoticeDto, UpdateCommissionRateDto},
        supportdtos::UpdateComplaintStatusDto,
        userdtos::{FilterUserDto, ReassignShopDto, ResetPasswordDto, UserData, UserResponseDto},
    },
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::shopmodel::ShopSummary,
    utils::currency::percent_to_bps,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/shops", get(get_shops))
        .route("/shops/:shop_id", get(get_shop))
        .route("/shops/:shop_id/approval", put(toggle_shop_approval))
        .route("/shops/:shop_id/commission-rate", put(update_commission_rate))
        .route("/payouts", get(get_payouts))
        .route("/payouts/:payout_id/paid", put(confirm_payout))
        .route("/payouts/:payout_id/reject", put(reject_payout))
        .route("/complaints", get(get_complaints))
        .route("/complaints/:complaint_id/status", put(update_complaint_status))
        .route("/notices", get(get_notices).post(send_notice))
        .route("/users", get(get_users))
        .route("/users/:user_id/password", put(reset_user_password))
        .route("/users/:user_id/shop", put(reassign_user_shop))
}

pub async fn get_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state.balance_service.admin_stats().await;

    Ok(Json(json!({
        "status": "success",
        "data": stats
    })))
}

pub async fn get_shops(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let shops = app_state.db_client.get_shops().await;
    let summaries: Vec<ShopSummary> = shops.iter().map(ShopSummary::from).collect();

    Ok(Json(json!({
        "status": "success",
        "data": summaries,
        "results": summaries.len()
    })))
}

pub async fn get_shop(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(shop_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let shop = app_state.shop_service.get_shop(shop_id).await?;
    let owner = app_state
        .db_client
        .get_user(shop.owner_id)
        .await
        .map(|owner| FilterUserDto::filter_user(&owner));
    let stats = app_state.balance_service.shop_stats(&shop).await;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "shop": shop,
            "owner": owner,
            "stats": stats
        }
    })))
}

pub async fn toggle_shop_approval(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(shop_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let shop = app_state.shop_service.toggle_approval(shop_id).await?;

    Ok(Json(json!({
        "status": "success",
        "data": ShopSummary::from(&shop)
    })))
}

pub async fn update_commission_rate(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(shop_id): Path<Uuid>,
    Json(body): Json<UpdateCommissionRateDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let shop = app_state
        .shop_service
        .set_commission_rate(shop_id, percent_to_bps(body.rate_percent))
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": ShopSummary::from(&shop)
    })))
}

pub async fn get_payouts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let payouts = app_state.payout_service.admin_payouts().await;

    Ok(Json(json!({
        "status": "success",
        "data": payouts
    })))
}

pub async fn confirm_payout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(payout_id): Path<Uuid>,
    Json(body): Json<PaymentProofDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let payout = app_state
        .payout_service
        .mark_paid(&user.user, None, payout_id, body)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": payout
    })))
}

pub async fn reject_payout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Path(payout_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payout = app_state
        .payout_service
        .reject(&user.user, None, payout_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": payout
    })))
}

pub async fn get_complaints(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let complaints = app_state.complaint_service.all_complaints().await;

    Ok(Json(json!({
        "status": "success",
        "data": complaints
    })))
}

pub async fn update_complaint_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(complaint_id): Path<Uuid>,
    Json(body): Json<UpdateComplaintStatusDto>,
) -> Result<impl IntoResponse, HttpError> {
    let complaint = app_state
        .complaint_service
        .update_status(complaint_id, body.status)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": complaint
    })))
}

pub async fn get_notices(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let notices = app_state.complaint_service.all_notices().await;

    Ok(Json(json!({
        "status": "success",
        "data": notices
    })))
}

pub async fn send_notice(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateNoticeDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let notice = app_state.complaint_service.send_notice(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": notice
        })),
    ))
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state.db_client.get_users().await;

    Ok(Json(json!({
        "status": "success",
        "data": FilterUserDto::filter_users(&users),
        "results": users.len()
    })))
}

pub async fn reset_user_password(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .user_service
        .reset_password(user_id, &body.new_password)
        .await?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn reassign_user_shop(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ReassignShopDto>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .user_service
        .reassign_shop(user_id, body.shop_id)
        .await?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}
