use actix_web::{web, HttpResponse};

use crate::application::record_service::BatchDeleteReport;
use crate::domain::models::{RecordId, SnackCombo};
use crate::domain::validation::SnackComboForm;
use crate::errors::AppError;

use super::records::{self, BatchDeleteRequest, RecordList};
use super::SnackComboService;

#[utoipa::path(
    get,
    path = "/snack-combos",
    responses(
        (status = 200, description = "Current snack combo list", body = RecordList<SnackCombo>),
    ),
    tag = "snack-combos"
)]
pub async fn list_snack_combos(service: web::Data<SnackComboService>) -> HttpResponse {
    records::list(service.get_ref()).await
}

/// POST /snack-combos
///
/// The stored subtotal is always `unitPrice × unitsPerCombo`.
#[utoipa::path(
    post,
    path = "/snack-combos",
    request_body = SnackComboForm,
    responses(
        (status = 201, description = "Snack combo created", body = SnackCombo),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "snack-combos"
)]
pub async fn create_snack_combo(
    service: web::Data<SnackComboService>,
    body: web::Json<SnackComboForm>,
) -> Result<HttpResponse, AppError> {
    records::create(service.get_ref(), body.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/snack-combos/{id}",
    params(("id" = String, Path, description = "Snack combo id")),
    request_body = SnackComboForm,
    responses(
        (status = 200, description = "Snack combo updated", body = SnackCombo),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "snack-combos"
)]
pub async fn update_snack_combo(
    service: web::Data<SnackComboService>,
    path: web::Path<String>,
    body: web::Json<SnackComboForm>,
) -> Result<HttpResponse, AppError> {
    records::update(service.get_ref(), RecordId::new(path.into_inner()), body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/snack-combos/{id}",
    params(("id" = String, Path, description = "Snack combo id")),
    responses(
        (status = 204, description = "Snack combo deleted"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "snack-combos"
)]
pub async fn delete_snack_combo(
    service: web::Data<SnackComboService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    records::delete(service.get_ref(), RecordId::new(path.into_inner())).await
}

#[utoipa::path(
    post,
    path = "/snack-combos/batch-delete",
    request_body = BatchDeleteRequest,
    responses(
        (status = 200, description = "Per-id outcome", body = BatchDeleteReport),
    ),
    tag = "snack-combos"
)]
pub async fn batch_delete_snack_combos(
    service: web::Data<SnackComboService>,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    records::batch_delete(service.get_ref(), body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/snack-combos",
    responses(
        (status = 200, description = "Per-id outcome", body = BatchDeleteReport),
    ),
    tag = "snack-combos"
)]
pub async fn delete_all_snack_combos(service: web::Data<SnackComboService>) -> HttpResponse {
    records::delete_all(service.get_ref()).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/snack-combos")
            .route("", web::get().to(list_snack_combos))
            .route("", web::post().to(create_snack_combo))
            .route("", web::delete().to(delete_all_snack_combos))
            .route("/batch-delete", web::post().to(batch_delete_snack_combos))
            .route("/{id}", web::put().to(update_snack_combo))
            .route("/{id}", web::delete().to(delete_snack_combo)),
    );
}
