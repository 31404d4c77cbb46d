use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        admin::admin_handler, auth::auth_handler, customer::customer_handler, shop::shop_handler,
    },
    middleware::{auth, role_check},
    models::usermodel::UserRole,
    AppState,
};

async fn health_check(Extension(app_state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
        "persistence": app_state.db_client.persistence_name()
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest(
            "/admin",
            admin_handler()
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin])
                }))
                .layer(middleware::from_fn(auth)),
        )
        .nest(
            "/shop",
            shop_handler()
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::ShopOwner])
                }))
                .layer(middleware::from_fn(auth)),
        )
        .nest(
            "/customer",
            customer_handler()
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Customer])
                }))
                .layer(middleware::from_fn(auth)),
        );

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{config::Config, db::db::DBClient};

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

    async fn app() -> Router {
        let config = Config::for_tests();
        let app_state = AppState::new(DBClient::in_memory(), config.clone());
        app_state.user_service.seed_admin(&config).await.unwrap();
        create_router(Arc::new(app_state))
    }

    async fn call(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(app: &Router, identifier: &str, role: &str, password: Option<&str>) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": identifier, "role": role, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn register_shop(app: &Router) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/api/auth/register-shop",
            None,
            Some(json!({
                "owner_name": "Rahul Sharma",
                "shop_name": "Sharma Mobiles",
                "mobile": "9876543210",
                "password": "shop@123",
                "address": "MG Road, Pune",
                "gst_number": "27AAPFU0939F1ZV",
                "gst_certificate_photo": PNG,
                "shop_photo": PNG,
                "owner_selfie_photo": PNG
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["shop"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_backend() {
        let app = app().await;
        let (status, body) = call(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["persistence"], "memory");
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let app = app().await;

        let (unknown_status, unknown) = call(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "nobody@rfm.local", "role": "admin", "password": "x" })),
        )
        .await;
        let (wrong_status, wrong) = call(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "admin@rfm.local", "role": "admin", "password": "nope" })),
        )
        .await;
        let (missing_status, missing) = call(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "identifier": "admin@rfm.local", "role": "admin" })),
        )
        .await;

        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_status, unknown_status);
        assert_eq!(missing_status, unknown_status);
        assert_eq!(unknown["message"], wrong["message"]);
        assert_eq!(unknown["message"], missing["message"]);
    }

    #[tokio::test]
    async fn protected_routes_need_a_token_and_the_right_role() {
        let app = app().await;

        let (status, _) = call(&app, Method::GET, "/api/admin/stats", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        register_shop(&app).await;
        let owner = login(&app, "9876543210", "shop_owner", Some("shop@123")).await;
        let (status, _) = call(&app, Method::GET, "/api/admin/stats", Some(&owner), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unapproved_shop_only_sees_its_status() {
        let app = app().await;
        register_shop(&app).await;
        let owner = login(&app, "9876543210", "shop_owner", Some("shop@123")).await;

        let (status, body) = call(&app, Method::GET, "/api/shop/status", Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_approved"], false);

        let (status, _) = call(&app, Method::GET, "/api/shop/products", Some(&owner), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn referral_to_payout_flow() {
        let app = app().await;
        let shop_id = register_shop(&app).await;
        let admin = login(&app, "admin@rfm.local", "admin", Some("Admin@123")).await;
        let owner = login(&app, "9876543210", "shop_owner", Some("shop@123")).await;

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/api/admin/shops/{}/approval", shop_id),
            Some(&admin),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_approved"], true);

        let (status, product) = call(
            &app,
            Method::POST,
            "/api/shop/products",
            Some(&owner),
            Some(json!({
                "name": "Galaxy S24",
                "brand": "Samsung",
                "price": 79999.0,
                "commission": 500.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{product}");
        let product_id = product["data"]["id"].as_str().unwrap().to_string();

        let (status, customer) = call(
            &app,
            Method::POST,
            "/api/shop/customers",
            Some(&owner),
            Some(json!({ "name": "Amit", "mobile": "9000000001" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{customer}");

        // Customers sign in with their mobile alone.
        let amit = login(&app, "9000000001", "customer", None).await;

        let (status, lead) = call(
            &app,
            Method::POST,
            "/api/customer/leads",
            Some(&amit),
            Some(json!({
                "product_id": product_id,
                "referral_name": "Ravi Kumar",
                "referral_mobile": "9111111111"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{lead}");
        let lead_id = lead["data"]["id"].as_str().unwrap().to_string();

        let convert = format!("/api/shop/leads/{}/convert", lead_id);
        let (status, converted) = call(&app, Method::PUT, &convert, Some(&owner), None).await;
        assert_eq!(status, StatusCode::OK, "{converted}");
        assert_eq!(converted["data"]["sale"]["customer_commission_earned"], 47_500);
        assert_eq!(converted["data"]["sale"]["admin_commission_earned"], 2_500);

        let (status, _) = call(&app, Method::PUT, &convert, Some(&owner), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/customer/withdraw",
            Some(&amit),
            Some(json!({ "upi_id": "amit@upi", "amount": 50.0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, payout) = call(
            &app,
            Method::POST,
            "/api/customer/withdraw",
            Some(&amit),
            Some(json!({ "upi_id": "amit@upi" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{payout}");
        assert_eq!(payout["data"]["amount"], 47_500);
        let payout_id = payout["data"]["id"].as_str().unwrap().to_string();

        let paid = format!("/api/shop/payouts/{}/paid", payout_id);
        let (status, settled) = call(
            &app,
            Method::PUT,
            &paid,
            Some(&owner),
            Some(json!({ "transaction_id": "UTR0001" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{settled}");
        assert_eq!(settled["data"]["status"], "paid");

        let (status, _) = call(
            &app,
            Method::PUT,
            &paid,
            Some(&owner),
            Some(json!({ "transaction_id": "UTR0002" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, dashboard) =
            call(&app, Method::GET, "/api/customer/dashboard", Some(&amit), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard["data"]["balance"]["earned"], 47_500);
        assert_eq!(dashboard["data"]["balance"]["withdrawable"], 0);

        let (status, stats) = call(&app, Method::GET, "/api/admin/stats", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["data"]["total_admin_commission"], 2_500);
        assert_eq!(stats["data"]["active_shops"], 1);
    }
}
