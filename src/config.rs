// config.rs
use std::path::PathBuf;

use crate::{
    models::shopmodel::{MAX_COMMISSION_RATE_BPS, MIN_COMMISSION_RATE_BPS},
    utils::currency::rupees_to_paise,
};

const DEFAULT_COMMISSION_RATE_BPS: i64 = 500;

/// Reads a fraction (`0.05`) and keeps it inside the rate range shops may use.
fn commission_rate_bps(raw: Option<&str>) -> i64 {
    let Some(rate) = raw
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|rate| rate.is_finite())
    else {
        return DEFAULT_COMMISSION_RATE_BPS;
    };

    let bps = (rate * 10_000.0).round() as i64;
    let clamped = bps.clamp(MIN_COMMISSION_RATE_BPS, MAX_COMMISSION_RATE_BPS);
    if clamped != bps {
        tracing::warn!(
            "DEFAULT_COMMISSION_RATE {} is outside 1%-10%, using {} bps",
            rate,
            clamped
        );
    }
    clamped
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceKind {
    Memory,
    File,
    Redis,
}

impl PersistenceKind {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "memory" => PersistenceKind::Memory,
            "redis" => PersistenceKind::Redis,
            _ => PersistenceKind::File,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    pub app_url: String,
    pub cors_origins: Vec<String>,
    // Storage
    pub persistence: PersistenceKind,
    pub data_dir: PathBuf,
    pub redis_url: Option<String>,
    // Seeded platform administrator
    pub admin_email: String,
    pub admin_password: String,
    pub admin_upi_id: String,
    // Business rules
    pub min_withdrawal_paise: i64,
    pub default_commission_rate_bps: i64,
}

impl Config {
    pub fn init() -> Config {
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(60);
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8000);

        let app_url = std::env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let persistence = PersistenceKind::parse(
            &std::env::var("PERSISTENCE").unwrap_or_else(|_| "file".to_string()),
        );
        let data_dir = PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
        let redis_url = std::env::var("REDIS_URL").ok();

        let admin_email = std::env::var("ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@rfm.local".to_string());
        let admin_password = std::env::var("ADMIN_PASSWORD")
            .unwrap_or_else(|_| "Admin@123".to_string());
        let admin_upi_id = std::env::var("ADMIN_UPI_ID")
            .unwrap_or_else(|_| "admin@upi".to_string());

        // Rupees in the environment, paise in memory
        let min_withdrawal_paise = std::env::var("MIN_WITHDRAWAL")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .and_then(|rupees| rupees_to_paise(rupees).ok())
            .unwrap_or(10_000);
        let default_commission_rate_bps =
            commission_rate_bps(std::env::var("DEFAULT_COMMISSION_RATE").ok().as_deref());

        Config {
            jwt_secret,
            jwt_maxage,
            port,
            app_url,
            cors_origins,
            persistence,
            data_dir,
            redis_url,
            admin_email,
            admin_password,
            admin_upi_id,
            min_withdrawal_paise,
            default_commission_rate_bps,
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Config {
        Config {
            jwt_secret: "test-secret".to_string(),
            jwt_maxage: 60,
            port: 0,
            app_url: "http://localhost:5173".to_string(),
            cors_origins: vec![],
            persistence: PersistenceKind::Memory,
            data_dir: PathBuf::from("data"),
            redis_url: None,
            admin_email: "admin@rfm.local".to_string(),
            admin_password: "Admin@123".to_string(),
            admin_upi_id: "admin@upi".to_string(),
            min_withdrawal_paise: 10_000,
            default_commission_rate_bps: DEFAULT_COMMISSION_RATE_BPS,
        }
    }
}
