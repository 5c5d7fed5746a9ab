//! Configuration types.

use crate::wizard::WebsiteType;

/// Application configuration for the wizard driver.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the selection-store database file.
    pub db_path: String,
    /// Website type assumed when none has been chosen yet.
    pub default_website_type: WebsiteType,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "./data/sitequote.db".to_string(),
            default_website_type: WebsiteType::Single,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            db_path: std::env::var("SITEQUOTE_DB_PATH").unwrap_or(defaults.db_path),
            default_website_type: std::env::var("SITEQUOTE_WEBSITE_TYPE")
                .map(|v| WebsiteType::parse(&v))
                .unwrap_or(defaults.default_website_type),
        }
    }
}
