mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::db::{db::DBClient, persistence};

use service::{
    balance_service::BalanceService, complaint_service::ComplaintService,
    payout_service::PayoutService, product_service::ProductService, sale_service::SaleService,
    shop_service::ShopService, user_service::UserService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    // Services
    pub user_service: Arc<UserService>,
    pub shop_service: Arc<ShopService>,
    pub product_service: Arc<ProductService>,
    pub sale_service: Arc<SaleService>,
    pub payout_service: Arc<PayoutService>,
    pub balance_service: Arc<BalanceService>,
    pub complaint_service: Arc<ComplaintService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client_arc = Arc::new(db_client);

        let user_service = Arc::new(UserService::new(db_client_arc.clone()));
        let shop_service = Arc::new(ShopService::new(
            db_client_arc.clone(),
            config.default_commission_rate_bps,
        ));
        let product_service = Arc::new(ProductService::new(db_client_arc.clone()));
        let sale_service = Arc::new(SaleService::new(db_client_arc.clone()));
        let payout_service = Arc::new(PayoutService::new(
            db_client_arc.clone(),
            config.min_withdrawal_paise,
            config.admin_upi_id.clone(),
        ));
        let balance_service = Arc::new(BalanceService::new(db_client_arc.clone()));
        let complaint_service = Arc::new(ComplaintService::new(db_client_arc.clone()));

        Self {
            env: config,
            db_client: db_client_arc,
            user_service,
            shop_service,
            product_service,
            sale_service,
            payout_service,
            balance_service,
            complaint_service,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::init();

    let backend = persistence::from_config(&config).await;
    let db_client = match DBClient::load(backend).await {
        Ok(db_client) => {
            println!("✅ Store loaded from the {} backend", db_client.persistence_name());
            db_client
        }
        Err(err) => {
            println!("🔥 Failed to load the store: {}", err);
            std::process::exit(1);
        }
    };

    let app_state = Arc::new(AppState::new(db_client, config.clone()));

    if let Err(err) = app_state.user_service.seed_admin(&config).await {
        println!("🔥 Failed to seed the admin account: {}", err);
        std::process::exit(1);
    }

    let allowed_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    let app = create_router(app_state.clone()).layer(cors);

    println!("🚀 Server is running on http://localhost:{}", config.port);

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            println!("🔥 Failed to bind port {}: {}", config.port, err);
            std::process::exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, app).await {
        println!("🔥 Server error: {}", err);
    }
}
