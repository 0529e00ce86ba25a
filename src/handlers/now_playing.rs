use actix_web::{web, HttpResponse};

use crate::application::now_playing::{ImportReport, NowPlayingEntry};
use crate::errors::AppError;

use super::NowPlayingHandle;

/// GET /now-playing
///
/// Up to 20 titles from the first page of the catalog listing.
#[utoipa::path(
    get,
    path = "/now-playing",
    responses(
        (status = 200, description = "Titles now playing", body = Vec<NowPlayingEntry>),
        (status = 502, description = "Upstream request failed"),
        (status = 503, description = "Catalog access is not configured"),
    ),
    tag = "now-playing"
)]
pub async fn list_now_playing(
    service: web::Data<NowPlayingHandle>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.list().await?))
}

/// POST /now-playing/import
///
/// Creates a movie for each listed title not already present.
#[utoipa::path(
    post,
    path = "/now-playing/import",
    responses(
        (status = 200, description = "Import outcome", body = ImportReport),
        (status = 502, description = "Upstream request failed"),
        (status = 503, description = "Catalog access is not configured"),
    ),
    tag = "now-playing"
)]
pub async fn import_now_playing(
    service: web::Data<NowPlayingHandle>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(service.import().await?))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/now-playing")
            .route("", web::get().to(list_now_playing))
            .route("/import", web::post().to(import_now_playing)),
    );
}
