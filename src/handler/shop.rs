use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::{
        commissiondtos::PaymentProofDto,
        shopdtos::{CreateProductDto, RecordSaleDto},
        userdtos::{AddCustomerDto, FilterUserDto},
    },
    error::HttpError,
    middleware::{approved_shop, JWTAuthMiddeware, ShopContext},
    models::shopmodel::ShopSummary,
    AppState,
};

pub fn shop_handler() -> Router {
    let approved = Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/products", get(get_products).post(add_product))
        .route("/products/:product_id", delete(remove_product))
        .route("/customers", get(get_customers).post(add_customer))
        .route("/sales", get(get_sales).post(record_sale))
        .route("/leads", get(get_leads))
        .route("/leads/:lead_id/convert", put(convert_lead))
        .route("/leads/:lead_id/reject", put(reject_lead))
        .route("/payouts", get(get_customer_payouts))
        .route("/payouts/:payout_id/paid", put(mark_payout_paid))
        .route("/payouts/:payout_id/reject", put(reject_payout))
        .route("/admin-payouts", get(get_admin_payouts).post(pay_admin))
        .route("/notices", get(get_notices))
        .route("/notices/:notice_id/read", put(mark_notice_read))
        .layer(middleware::from_fn(approved_shop));

    Router::new()
        .route("/status", get(get_status))
        .merge(approved)
}

/// Reachable before approval so the owner can see where registration stands.
pub async fn get_status(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let shop = app_state.shop_service.shop_for_owner(&user.user).await?;

    Ok(Json(json!({
        "status": "success",
        "data": ShopSummary::from(&shop)
    })))
}

pub async fn get_dashboard(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state.balance_service.shop_stats(&ctx.shop).await;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "shop": ctx.shop,
            "stats": stats
        }
    })))
}

pub async fn get_products(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let products = app_state.product_service.list_products(ctx.shop.id).await;

    Ok(Json(json!({
        "status": "success",
        "data": products
    })))
}

pub async fn add_product(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Json(body): Json<CreateProductDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let product = app_state
        .product_service
        .add_product(ctx.shop.id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": product
        })),
    ))
}

pub async fn remove_product(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .product_service
        .remove_product(ctx.shop.id, product_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Product removed"
    })))
}

pub async fn get_customers(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let customers = app_state.db_client.get_shop_customers(ctx.shop.id).await;

    let mut data = Vec::with_capacity(customers.len());
    for customer in &customers {
        let balance = app_state.balance_service.customer_balance(customer.id).await;
        data.push(json!({
            "user": FilterUserDto::filter_user(customer),
            "balance": balance
        }));
    }

    Ok(Json(json!({
        "status": "success",
        "data": data,
        "results": data.len()
    })))
}

pub async fn add_customer(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Json(body): Json<AddCustomerDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let customer = app_state
        .user_service
        .create_customer(ctx.shop.id, body.name.trim().to_string(), body.mobile, None)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": FilterUserDto::filter_user(&customer)
        })),
    ))
}

pub async fn get_sales(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let sales = app_state.sale_service.shop_sales(ctx.shop.id).await;

    Ok(Json(json!({
        "status": "success",
        "data": sales
    })))
}

pub async fn record_sale(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Json(body): Json<RecordSaleDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let sale = app_state
        .sale_service
        .record_manual_sale(ctx.shop.id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": sale
        })),
    ))
}

pub async fn get_leads(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let leads = app_state.sale_service.shop_leads(ctx.shop.id).await;

    Ok(Json(json!({
        "status": "success",
        "data": leads
    })))
}

pub async fn convert_lead(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Path(lead_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let (lead, sale) = app_state
        .sale_service
        .convert_lead(ctx.shop.id, lead_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": {
            "lead": lead,
            "sale": sale
        }
    })))
}

pub async fn reject_lead(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Path(lead_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let lead = app_state
        .sale_service
        .reject_lead(ctx.shop.id, lead_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": lead
    })))
}

pub async fn get_customer_payouts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let payouts = app_state
        .payout_service
        .shop_customer_payouts(ctx.shop.id)
        .await;

    Ok(Json(json!({
        "status": "success",
        "data": payouts
    })))
}

pub async fn mark_payout_paid(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Extension(ctx): Extension<ShopContext>,
    Path(payout_id): Path<Uuid>,
    Json(body): Json<PaymentProofDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let payout = app_state
        .payout_service
        .mark_paid(&user.user, Some(ctx.shop.id), payout_id, body)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": payout
    })))
}

pub async fn reject_payout(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
    Extension(ctx): Extension<ShopContext>,
    Path(payout_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payout = app_state
        .payout_service
        .reject(&user.user, Some(ctx.shop.id), payout_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": payout
    })))
}

pub async fn get_admin_payouts(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let payouts = app_state.payout_service.shop_admin_payouts(ctx.shop.id).await;

    Ok(Json(json!({
        "status": "success",
        "data": payouts
    })))
}

pub async fn pay_admin(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Json(body): Json<PaymentProofDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let payout = app_state
        .payout_service
        .request_admin_payout(ctx.shop.id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "data": payout
        })),
    ))
}

pub async fn get_notices(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
) -> Result<impl IntoResponse, HttpError> {
    let notices = app_state.complaint_service.shop_notices(ctx.shop.id).await;

    Ok(Json(json!({
        "status": "success",
        "data": notices
    })))
}

pub async fn mark_notice_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(ctx): Extension<ShopContext>,
    Path(notice_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notice = app_state
        .complaint_service
        .mark_notice_read(ctx.shop.id, notice_id)
        .await?;

    Ok(Json(json!({
        "status": "success",
        "data": notice
    })))
}
