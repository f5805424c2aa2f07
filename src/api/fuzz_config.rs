//! Per-scope fuzzer configuration handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::Repositories;
use crate::error::{AppError, AppResult};
use crate::models::{FuzzConfig, StatusResponse};

async fn ensure_scope(repos: &Repositories, id: Uuid) -> AppResult<()> {
    repos
        .scopes
        .get_scope_target(id)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("Scope target {}", id)))
}

/// Get the stored fuzzer configuration; an empty document when none is saved.
#[utoipa::path(
    get,
    path = "/api/v1/scope/{scope_target_id}/fuzz-config",
    tag = "Fuzz Config",
    params(("scope_target_id" = Uuid, Path, description = "Scope target UUID")),
    responses(
        (status = 200, description = "Configuration document", body = FuzzConfig),
        (status = 404, description = "Unknown scope target", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_fuzz_config(
    repos: web::Data<Repositories>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    ensure_scope(&repos, id).await?;

    let doc = repos
        .fuzz_configs
        .get_fuzz_config(id)
        .await?
        .unwrap_or_else(|| serde_json::json!({}));
    Ok(HttpResponse::Ok().json(doc))
}

/// Save the fuzzer configuration, replacing any previous document.
#[utoipa::path(
    put,
    path = "/api/v1/scope/{scope_target_id}/fuzz-config",
    tag = "Fuzz Config",
    params(("scope_target_id" = Uuid, Path, description = "Scope target UUID")),
    request_body = FuzzConfig,
    responses(
        (status = 200, description = "Saved", body = StatusResponse),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown scope target", body = crate::error::ErrorResponse),
    )
)]
pub async fn put_fuzz_config(
    repos: web::Data<Repositories>,
    path: web::Path<Uuid>,
    body: web::Json<FuzzConfig>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    ensure_scope(&repos, id).await?;

    repos
        .fuzz_configs
        .upsert_fuzz_config(id, &body.into_inner())
        .await?;
    info!("Saved fuzz config for scope target {}", id);

    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// Configure fuzz config routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/scope/{scope_target_id}/fuzz-config")
            .route(web::get().to(get_fuzz_config))
            .route(web::put().to(put_fuzz_config)),
    );
}
