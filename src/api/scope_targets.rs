//! Scope target API handlers.

use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

use crate::db::Repositories;
use crate::error::{AppError, AppResult};
use crate::models::{CreateScopeTargetRequest, ScopeTarget};

/// Register a scope target.
#[utoipa::path(
    post,
    path = "/api/v1/scope-targets",
    tag = "Scope Targets",
    request_body = CreateScopeTargetRequest,
    responses(
        (status = 201, description = "Scope target created", body = ScopeTarget),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 409, description = "Already registered", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_scope_target(
    repos: web::Data<Repositories>,
    body: web::Json<CreateScopeTargetRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let value = req.scope_target.trim();
    if value.is_empty() {
        return Err(AppError::InvalidInput(
            "scope_target must not be empty".to_string(),
        ));
    }

    let scope = repos
        .scopes
        .create_scope_target(req.scope_type, value)
        .await?;
    info!(
        "Registered {} scope target {} ({})",
        scope.scope_type, scope.scope_target, scope.id
    );

    Ok(HttpResponse::Created().json(scope))
}

/// List scope targets, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/scope-targets",
    tag = "Scope Targets",
    responses(
        (status = 200, description = "Scope targets", body = Vec<ScopeTarget>),
    )
)]
pub async fn list_scope_targets(repos: web::Data<Repositories>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(repos.scopes.list_scope_targets().await?))
}

/// Get a scope target.
#[utoipa::path(
    get,
    path = "/api/v1/scope-targets/{id}",
    tag = "Scope Targets",
    params(("id" = Uuid, Path, description = "Scope target UUID")),
    responses(
        (status = 200, description = "Scope target", body = ScopeTarget),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_scope_target(
    repos: web::Data<Repositories>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let scope = repos
        .scopes
        .get_scope_target(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Scope target {}", id)))?;
    Ok(HttpResponse::Ok().json(scope))
}

/// Delete a scope target together with its scans and fuzz config.
#[utoipa::path(
    delete,
    path = "/api/v1/scope-targets/{id}",
    tag = "Scope Targets",
    params(("id" = Uuid, Path, description = "Scope target UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_scope_target(
    repos: web::Data<Repositories>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    if !repos.scopes.delete_scope_target(id).await? {
        return Err(AppError::NotFound(format!("Scope target {}", id)));
    }
    info!("Deleted scope target {}", id);
    Ok(HttpResponse::NoContent().finish())
}

/// Configure scope target routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/scope-targets")
            .route(web::post().to(create_scope_target))
            .route(web::get().to(list_scope_targets)),
    )
    .service(
        web::resource("/scope-targets/{id}")
            .route(web::get().to(get_scope_target))
            .route(web::delete().to(delete_scope_target)),
    );
}
