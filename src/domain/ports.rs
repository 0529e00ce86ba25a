use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::DomainError;
use super::models::RecordId;
use super::validation::{FieldErrors, ValidationContext};

/// A record kind kept by the remote store under its own endpoint.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Endpoint segment, e.g. `movies` for `GET /movies`.
    const PATH: &'static str;
    /// Body sent on create/update; the store assigns the id.
    type Draft: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    fn id(&self) -> &RecordId;
}

/// A resource managed through a flat console form.
pub trait Editable: Resource {
    type Form: DeserializeOwned + Send + 'static;

    fn validate(form: Self::Form, ctx: &ValidationContext) -> Result<Self::Draft, FieldErrors>;
}

#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, DomainError>;
    async fn list_by<R: Resource>(
        &self,
        field: &str,
        value: &RecordId,
    ) -> Result<Vec<R>, DomainError>;
    async fn get<R: Resource>(&self, id: &RecordId) -> Result<R, DomainError>;
    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, DomainError>;
    async fn update<R: Resource>(&self, id: &RecordId, draft: &R::Draft)
        -> Result<R, DomainError>;
    async fn delete<R: Resource>(&self, id: &RecordId) -> Result<(), DomainError>;
}

/// One page of the third-party "now playing" listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingPage {
    pub page: u32,
    pub total_pages: u32,
    pub titles: Vec<NowPlayingTitle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingTitle {
    pub catalog_id: u64,
    pub title: String,
    pub synopsis: String,
    pub poster_path: Option<String>,
    pub release_date: String,
}

#[async_trait]
pub trait NowPlayingCatalog: Send + Sync + 'static {
    async fn now_playing(&self, page: u32) -> Result<NowPlayingPage, DomainError>;
}
