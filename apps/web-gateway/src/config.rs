//! Gateway configuration loaded from environment variables.

use std::env;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub content_api_url: String,
    pub plant_bible_api_url: String,
    pub garden_api_url: String,
    /// Base URL of the auth endpoints (`/auth/...`).
    pub auth_api_url: String,
    /// Articles per listing page.
    pub listing_page_size: u32,
    /// Mark session cookies `Secure`. Off for local HTTP development.
    pub cookie_secure: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            content_api_url: "http://localhost:1337/api".to_string(),
            plant_bible_api_url: "http://localhost:4000".to_string(),
            garden_api_url: "http://localhost:4000/api/v1".to_string(),
            auth_api_url: "http://localhost:4000/api/v1".to_string(),
            listing_page_size: sylva_client::content::DEFAULT_PAGE_SIZE,
            cookie_secure: false,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        // The garden backend also serves auth unless told otherwise.
        let garden_api_url = env::var("GARDEN_API_URL").unwrap_or(defaults.garden_api_url);
        let auth_api_url = env::var("AUTH_API_URL").unwrap_or_else(|_| garden_api_url.clone());

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            content_api_url: env::var("CONTENT_API_URL").unwrap_or(defaults.content_api_url),
            plant_bible_api_url: env::var("PLANT_BIBLE_API_URL")
                .unwrap_or(defaults.plant_bible_api_url),
            garden_api_url,
            auth_api_url,
            listing_page_size: env::var("LISTING_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.listing_page_size),
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.cookie_secure),
        }
    }
}
