use thiserror::Error;

use super::validation::FieldErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Record not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    Validation(FieldErrors),
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Collaborator answered with status {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("No seats available for this showtime")]
    NoSeatsAvailable,
    #[error("{0}")]
    CatalogDisabled(String),
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}
