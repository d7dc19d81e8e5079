//! Application state - shared across all handlers.

use std::sync::Arc;

use sylva_client::{AuthApi, ContentClient, GardenClient, PlantBibleClient, ReqwestTransport};
use sylva_core::AccessPolicy;
use sylva_core::ports::HttpTransport;

use crate::config::GatewayConfig;

/// Shared application state. Clients are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentClient,
    pub plants: PlantBibleClient,
    pub garden: GardenClient,
    pub auth: AuthApi,
    pub policy: Arc<AccessPolicy>,
    pub page_size: u32,
    pub cookie_secure: bool,
}

/// One transport per backend.
pub struct Backends {
    pub content: Arc<dyn HttpTransport>,
    pub plant_bible: Arc<dyn HttpTransport>,
    pub garden: Arc<dyn HttpTransport>,
    pub auth: Arc<dyn HttpTransport>,
}

impl AppState {
    /// Build the state with reqwest transports pointed at the configured backends.
    pub fn new(config: &GatewayConfig) -> Self {
        let backends = Backends {
            content: Arc::new(ReqwestTransport::new(&config.content_api_url)),
            plant_bible: Arc::new(ReqwestTransport::new(&config.plant_bible_api_url)),
            garden: Arc::new(ReqwestTransport::new(&config.garden_api_url)),
            auth: Arc::new(ReqwestTransport::new(&config.auth_api_url)),
        };

        tracing::info!(
            content = %config.content_api_url,
            plant_bible = %config.plant_bible_api_url,
            garden = %config.garden_api_url,
            auth = %config.auth_api_url,
            "Application state initialized"
        );

        Self::with_backends(backends, config)
    }

    pub fn with_backends(backends: Backends, config: &GatewayConfig) -> Self {
        Self {
            content: ContentClient::new(backends.content),
            plants: PlantBibleClient::new(backends.plant_bible),
            garden: GardenClient::new(backends.garden),
            auth: AuthApi::new(backends.auth),
            policy: Arc::new(AccessPolicy::default()),
            page_size: config.listing_page_size,
            cookie_secure: config.cookie_secure,
        }
    }
}
