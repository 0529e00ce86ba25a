use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};

use crate::domain::errors::DomainError;
use crate::domain::models::RecordId;
use crate::domain::ports::{RecordStore, Resource};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DomainError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            DomainError::Status(status.as_u16())
        } else {
            DomainError::Transport(e.to_string())
        }
    }
}

fn ensure_success(response: Response) -> Result<Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(DomainError::Status(status.as_u16()))
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// JSON-over-HTTP record store with one collection endpoint per resource.
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base_url: Url,
}

impl RestStore {
    pub fn new(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::Transport(format!("store URL {} has no path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, DomainError> {
        let url = self.endpoint(&[R::PATH])?;
        let response = self.http.get(url).send().await?;
        Ok(ensure_success(response)?.json().await?)
    }

    async fn list_by<R: Resource>(
        &self,
        field: &str,
        value: &RecordId,
    ) -> Result<Vec<R>, DomainError> {
        let url = self.endpoint(&[R::PATH])?;
        let response = self
            .http
            .get(url)
            .query(&[(field, value.as_str())])
            .send()
            .await?;
        Ok(ensure_success(response)?.json().await?)
    }

    async fn get<R: Resource>(&self, id: &RecordId) -> Result<R, DomainError> {
        let url = self.endpoint(&[R::PATH, id.as_str()])?;
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DomainError::NotFound);
        }
        Ok(ensure_success(response)?.json().await?)
    }

    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, DomainError> {
        let url = self.endpoint(&[R::PATH])?;
        let response = self.http.post(url).json(draft).send().await?;
        Ok(ensure_success(response)?.json().await?)
    }

    async fn update<R: Resource>(
        &self,
        id: &RecordId,
        draft: &R::Draft,
    ) -> Result<R, DomainError> {
        let url = self.endpoint(&[R::PATH, id.as_str()])?;
        let response = self.http.put(url).json(draft).send().await?;
        Ok(ensure_success(response)?.json().await?)
    }

    async fn delete<R: Resource>(&self, id: &RecordId) -> Result<(), DomainError> {
        let url = self.endpoint(&[R::PATH, id.as_str()])?;
        let response = self.http.delete(url).send().await?;
        ensure_success(response)?;
        Ok(())
    }
}
