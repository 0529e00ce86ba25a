use actix_web::{web, HttpResponse};

use crate::application::record_service::BatchDeleteReport;
use crate::domain::models::{RecordId, Room};
use crate::domain::validation::RoomForm;
use crate::errors::AppError;

use super::records::{self, BatchDeleteRequest, RecordList};
use super::RoomService;

#[utoipa::path(
    get,
    path = "/rooms",
    responses(
        (status = 200, description = "Current room list", body = RecordList<Room>),
    ),
    tag = "rooms"
)]
pub async fn list_rooms(service: web::Data<RoomService>) -> HttpResponse {
    records::list(service.get_ref()).await
}

#[utoipa::path(
    post,
    path = "/rooms",
    request_body = RoomForm,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "rooms"
)]
pub async fn create_room(
    service: web::Data<RoomService>,
    body: web::Json<RoomForm>,
) -> Result<HttpResponse, AppError> {
    records::create(service.get_ref(), body.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/rooms/{id}",
    params(("id" = String, Path, description = "Room id")),
    request_body = RoomForm,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "rooms"
)]
pub async fn update_room(
    service: web::Data<RoomService>,
    path: web::Path<String>,
    body: web::Json<RoomForm>,
) -> Result<HttpResponse, AppError> {
    records::update(service.get_ref(), RecordId::new(path.into_inner()), body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    params(("id" = String, Path, description = "Room id")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "rooms"
)]
pub async fn delete_room(
    service: web::Data<RoomService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    records::delete(service.get_ref(), RecordId::new(path.into_inner())).await
}

#[utoipa::path(
    post,
    path = "/rooms/batch-delete",
    request_body = BatchDeleteRequest,
    responses(
        (status = 200, description = "Per-id outcome", body = BatchDeleteReport),
    ),
    tag = "rooms"
)]
pub async fn batch_delete_rooms(
    service: web::Data<RoomService>,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    records::batch_delete(service.get_ref(), body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/rooms",
    responses(
        (status = 200, description = "Per-id outcome", body = BatchDeleteReport),
    ),
    tag = "rooms"
)]
pub async fn delete_all_rooms(service: web::Data<RoomService>) -> HttpResponse {
    records::delete_all(service.get_ref()).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rooms")
            .route("", web::get().to(list_rooms))
            .route("", web::post().to(create_room))
            .route("", web::delete().to(delete_all_rooms))
            .route("/batch-delete", web::post().to(batch_delete_rooms))
            .route("/{id}", web::put().to(update_room))
            .route("/{id}", web::delete().to(delete_room)),
    );
}
