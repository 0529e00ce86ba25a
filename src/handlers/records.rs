//! Shared plumbing behind every record screen's handlers.

use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::record_service::RecordService;
use crate::application::view_state::Snapshot;
use crate::domain::models::RecordId;
use crate::domain::ports::Editable;
use crate::domain::validation::ValidationContext;
use crate::errors::AppError;
use crate::infrastructure::RestStore;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// The list a screen shows, as of its last successful reload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordList<T> {
    pub records: Vec<T>,
    /// `null` while no reload has ever succeeded.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl<T: Clone> From<&Snapshot<T>> for RecordList<T> {
    fn from(snapshot: &Snapshot<T>) -> Self {
        Self {
            records: snapshot.records.clone(),
            loaded_at: snapshot.loaded_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchDeleteRequest {
    #[schema(value_type = Vec<String>)]
    pub ids: Vec<RecordId>,
}

// ── Generic handlers ─────────────────────────────────────────────────────────

pub async fn list<R: Editable>(service: &RecordService<R, RestStore>) -> HttpResponse {
    let snapshot = service.refresh().await;
    HttpResponse::Ok().json(RecordList::from(snapshot.as_ref()))
}

pub async fn create<R: Editable>(
    service: &RecordService<R, RestStore>,
    form: R::Form,
) -> Result<HttpResponse, AppError> {
    let created = service.create(form, &ValidationContext::local_now()).await?;
    Ok(HttpResponse::Created().json(created))
}

pub async fn update<R: Editable>(
    service: &RecordService<R, RestStore>,
    id: RecordId,
    form: R::Form,
) -> Result<HttpResponse, AppError> {
    let updated = service
        .update(&id, form, &ValidationContext::local_now())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete<R: Editable>(
    service: &RecordService<R, RestStore>,
    id: RecordId,
) -> Result<HttpResponse, AppError> {
    service.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn batch_delete<R: Editable>(
    service: &RecordService<R, RestStore>,
    body: BatchDeleteRequest,
) -> HttpResponse {
    HttpResponse::Ok().json(service.delete_many(body.ids).await)
}

pub async fn delete_all<R: Editable>(service: &RecordService<R, RestStore>) -> HttpResponse {
    HttpResponse::Ok().json(service.delete_all().await)
}
