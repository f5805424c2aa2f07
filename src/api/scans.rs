//! Scan API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ScanJob, ScanTool, StartScanRequest, StartScanResponse};
use crate::services::ScanController;

/// Path segment to tool; unknown tools do not exist as resources.
fn parse_tool(raw: &str) -> AppResult<ScanTool> {
    ScanTool::parse(raw).ok_or_else(|| AppError::NotFound(format!("Tool '{}'", raw)))
}

/// Start a scan.
///
/// Validates the URL against the scope registry, records a pending job and
/// runs the tool in the background. Poll the returned id for the result.
#[utoipa::path(
    post,
    path = "/api/v1/scan/{tool}",
    tag = "Scans",
    params(
        ("tool" = String, Path, description = "katana | linkfinder | waybackurls | gau | ffuf")
    ),
    request_body = StartScanRequest,
    responses(
        (status = 202, description = "Scan accepted", body = StartScanResponse),
        (status = 400, description = "Invalid or unscoped target", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown tool", body = crate::error::ErrorResponse),
    )
)]
pub async fn start_scan(
    controller: web::Data<ScanController>,
    path: web::Path<String>,
    body: web::Json<StartScanRequest>,
) -> AppResult<HttpResponse> {
    let tool = parse_tool(&path.into_inner())?;
    let started = controller.create_scan(tool, body.into_inner()).await?;

    Ok(HttpResponse::Accepted().json(StartScanResponse {
        scan_id: started.scan_id,
    }))
}

/// Get a scan by id.
#[utoipa::path(
    get,
    path = "/api/v1/scan/{tool}/{scan_id}",
    tag = "Scans",
    params(
        ("tool" = String, Path, description = "Tool name"),
        ("scan_id" = Uuid, Path, description = "Scan UUID")
    ),
    responses(
        (status = 200, description = "Scan job", body = ScanJob),
        (status = 404, description = "Scan not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_scan(
    controller: web::Data<ScanController>,
    path: web::Path<(String, Uuid)>,
) -> AppResult<HttpResponse> {
    let (tool, scan_id) = path.into_inner();
    let tool = parse_tool(&tool)?;
    let job = controller.get_scan(tool, scan_id).await?;
    Ok(HttpResponse::Ok().json(job))
}

/// List a scope target's scans for one tool, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/scope/{scope_target_id}/scans/{tool}",
    tag = "Scans",
    params(
        ("scope_target_id" = Uuid, Path, description = "Scope target UUID"),
        ("tool" = String, Path, description = "Tool name")
    ),
    responses(
        (status = 200, description = "Scan jobs", body = Vec<ScanJob>),
        (status = 404, description = "Unknown tool", body = crate::error::ErrorResponse),
    )
)]
pub async fn list_scans(
    controller: web::Data<ScanController>,
    path: web::Path<(Uuid, String)>,
) -> AppResult<HttpResponse> {
    let (scope_target_id, tool) = path.into_inner();
    let tool = parse_tool(&tool)?;
    let jobs = controller.list_scans(tool, scope_target_id).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

/// Configure scan routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/scan/{tool}").route(web::post().to(start_scan)))
        .service(web::resource("/scan/{tool}/{scan_id}").route(web::get().to(get_scan)))
        .service(
            web::resource("/scope/{scope_target_id}/scans/{tool}")
                .route(web::get().to(list_scans)),
        );
}
