use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::domain::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Some fields are not valid")]
    Validation(FieldErrors),

    #[error("No seats available for this showtime")]
    NoSeatsAvailable,

    #[error("{0}")]
    CatalogDisabled(String),

    #[error("Upstream request failed")]
    Upstream,
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound => AppError::NotFound,
            DomainError::Validation(fields) => AppError::Validation(fields),
            DomainError::NoSeatsAvailable => AppError::NoSeatsAvailable,
            DomainError::CatalogDisabled(msg) => AppError::CatalogDisabled(msg),
            upstream @ (DomainError::Transport(_)
            | DomainError::Status(_)
            | DomainError::Decode(_)) => {
                log::error!("Upstream request failed: {}", upstream);
                AppError::Upstream
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoSeatsAvailable => StatusCode::CONFLICT,
            AppError::CatalogDisabled(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(fields) => serde_json::json!({
                "error": self.to_string(),
                "fields": fields,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
