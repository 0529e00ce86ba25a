use actix_web::{web, HttpResponse};

use crate::application::record_service::BatchDeleteReport;
use crate::application::showtime_board::ShowtimeRow;
use crate::domain::models::{RecordId, Showtime};
use crate::domain::validation::{ShowtimeForm, ValidationContext};
use crate::errors::AppError;

use super::records::{BatchDeleteRequest, RecordList};
use super::{sales, BoardHandle};

/// GET /showtimes
///
/// Showtimes joined with their movie title and room number. References that
/// no longer resolve show as "—".
#[utoipa::path(
    get,
    path = "/showtimes",
    responses(
        (status = 200, description = "Joined showtime board", body = RecordList<ShowtimeRow>),
    ),
    tag = "showtimes"
)]
pub async fn list_showtimes(board: web::Data<BoardHandle>) -> HttpResponse {
    let snapshot = board.reload().await;
    HttpResponse::Ok().json(RecordList::from(snapshot.as_ref()))
}

/// POST /showtimes
///
/// `dateTime` must parse and must not be in the past.
#[utoipa::path(
    post,
    path = "/showtimes",
    request_body = ShowtimeForm,
    responses(
        (status = 201, description = "Showtime created", body = Showtime),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "showtimes"
)]
pub async fn create_showtime(
    board: web::Data<BoardHandle>,
    body: web::Json<ShowtimeForm>,
) -> Result<HttpResponse, AppError> {
    let created = board
        .create(body.into_inner(), &ValidationContext::local_now())
        .await?;
    Ok(HttpResponse::Created().json(created))
}

#[utoipa::path(
    put,
    path = "/showtimes/{id}",
    params(("id" = String, Path, description = "Showtime id")),
    request_body = ShowtimeForm,
    responses(
        (status = 200, description = "Showtime updated", body = Showtime),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "showtimes"
)]
pub async fn update_showtime(
    board: web::Data<BoardHandle>,
    path: web::Path<String>,
    body: web::Json<ShowtimeForm>,
) -> Result<HttpResponse, AppError> {
    let updated = board
        .update(
            &RecordId::new(path.into_inner()),
            body.into_inner(),
            &ValidationContext::local_now(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[utoipa::path(
    delete,
    path = "/showtimes/{id}",
    params(("id" = String, Path, description = "Showtime id")),
    responses(
        (status = 204, description = "Showtime deleted"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "showtimes"
)]
pub async fn delete_showtime(
    board: web::Data<BoardHandle>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    board.delete(&RecordId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /showtimes/batch-delete
///
/// One delete per id, then a single rebuild of the joined board.
#[utoipa::path(
    post,
    path = "/showtimes/batch-delete",
    request_body = BatchDeleteRequest,
    responses(
        (status = 200, description = "Per-id outcome", body = BatchDeleteReport),
    ),
    tag = "showtimes"
)]
pub async fn batch_delete_showtimes(
    board: web::Data<BoardHandle>,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    HttpResponse::Ok().json(board.delete_many(body.into_inner().ids).await)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/showtimes")
            .route("", web::get().to(list_showtimes))
            .route("", web::post().to(create_showtime))
            .route("/batch-delete", web::post().to(batch_delete_showtimes))
            .route("/{id}", web::put().to(update_showtime))
            .route("/{id}", web::delete().to(delete_showtime))
            .route("/{id}/sale", web::get().to(sales::sale_context))
            .route("/{id}/sale", web::post().to(sales::confirm_sale))
            .route("/{id}/sale/quote", web::post().to(sales::quote_sale)),
    );
}
