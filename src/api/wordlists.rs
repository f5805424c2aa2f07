//! Fuzzer wordlist handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{StatusResponse, Wordlist};
use crate::services::WordlistStore;

/// Multipart field carrying the file.
const WORDLIST_FIELD: &str = "wordlist";

/// Upload a wordlist (multipart field `wordlist`).
#[utoipa::path(
    post,
    path = "/api/v1/fuzz/wordlists",
    tag = "Wordlists",
    request_body(content_type = "multipart/form-data", description = "File in field `wordlist`"),
    responses(
        (status = 201, description = "Wordlist stored", body = Wordlist),
        (status = 400, description = "Missing or invalid file", body = crate::error::ErrorResponse),
        (status = 413, description = "File too large", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_wordlist(
    store: web::Data<WordlistStore>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::InvalidInput(format!("Multipart error: {}", e)))?;

        let filename = field
            .content_disposition()
            .filter(|cd| cd.get_name() == Some(WORDLIST_FIELD))
            .map(|cd| cd.get_filename().map(String::from));

        let filename = match filename {
            Some(Some(name)) => name,
            Some(None) => return Err(AppError::InvalidInput("Missing filename".to_string())),
            None => {
                // Drain unrelated fields
                while let Some(chunk) = field.next().await {
                    let _ = chunk;
                }
                continue;
            }
        };

        let wordlist = store.save(&filename, field).await?;
        return Ok(HttpResponse::Created().json(wordlist));
    }

    Err(AppError::InvalidInput(format!(
        "Missing '{}' file field",
        WORDLIST_FIELD
    )))
}

/// List wordlists, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/fuzz/wordlists",
    tag = "Wordlists",
    responses(
        (status = 200, description = "Wordlists", body = Vec<Wordlist>),
    )
)]
pub async fn list_wordlists(store: web::Data<WordlistStore>) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(store.list().await?))
}

/// Delete a wordlist and its file.
#[utoipa::path(
    delete,
    path = "/api/v1/fuzz/wordlists/{id}",
    tag = "Wordlists",
    params(("id" = Uuid, Path, description = "Wordlist UUID")),
    responses(
        (status = 200, description = "Deleted", body = StatusResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_wordlist(
    store: web::Data<WordlistStore>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    store.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(StatusResponse::success()))
}

/// Configure wordlist routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/fuzz/wordlists")
            .route(web::post().to(upload_wordlist))
            .route(web::get().to(list_wordlists)),
    )
    .service(web::resource("/fuzz/wordlists/{id}").route(web::delete().to(delete_wordlist)));
}
