//! API endpoint modules.

pub mod fuzz_config;
pub mod health;
pub mod openapi;
pub mod scans;
pub mod scope_targets;
pub mod websocket;
pub mod wordlists;

use actix_web::web;

use crate::error::AppError;

pub use fuzz_config::configure_routes as configure_fuzz_config_routes;
pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use scans::configure_routes as configure_scan_routes;
pub use scope_targets::configure_routes as configure_scope_target_routes;
pub use websocket::configure_routes as configure_websocket_routes;
pub use wordlists::configure_routes as configure_wordlist_routes;

/// Every `/api/v1` route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(configure_health_routes)
        .configure(configure_scan_routes)
        .configure(configure_scope_target_routes)
        .configure(configure_fuzz_config_routes)
        .configure(configure_wordlist_routes)
        .configure(configure_websocket_routes);
}

/// Reject malformed JSON bodies with the standard error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}
