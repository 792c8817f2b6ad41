//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub payment: PaymentSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Base URL of the platform REST API, e.g. `https://api.example.com`.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentSettings {
    /// Base URL of the payment-intent service.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Path of the JSON document backing the durable session store.
    pub path: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("GATHER_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("api.base_url", "http://localhost:5000")?
            .set_default("payment.base_url", "http://localhost:5001")?
            .set_default("storage.path", "gather-session.json")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("GATHER").separator("__").try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
