//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recon Scan Server",
        version = "0.1.0",
        description = "Runs reconnaissance tools against scoped targets and serves their results for polling"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Scan endpoints
        api::scans::start_scan,
        api::scans::get_scan,
        api::scans::list_scans,
        // Scope targets
        api::scope_targets::create_scope_target,
        api::scope_targets::list_scope_targets,
        api::scope_targets::get_scope_target,
        api::scope_targets::delete_scope_target,
        // Fuzzer
        api::fuzz_config::get_fuzz_config,
        api::fuzz_config::put_fuzz_config,
        api::wordlists::upload_wordlist,
        api::wordlists::list_wordlists,
        api::wordlists::delete_wordlist,
    ),
    components(
        schemas(
            error::ErrorResponse,
            api::health::HealthResponse,
            api::health::ReadyResponse,
            models::ScanTool,
            models::ScanStatus,
            models::ScanJob,
            models::ScanPayload,
            models::FuzzResults,
            models::FuzzEndpoint,
            models::StartScanRequest,
            models::StartScanResponse,
            models::ScopeType,
            models::ScopeTarget,
            models::CreateScopeTargetRequest,
            models::FuzzConfig,
            models::Wordlist,
            models::StatusResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Scans", description = "Start scans and poll their results"),
        (name = "Scope Targets", description = "Targets authorized for scanning"),
        (name = "Fuzz Config", description = "Per-scope ffuf configuration"),
        (name = "Wordlists", description = "Uploaded ffuf wordlists")
    )
)]
pub struct ApiDoc;
