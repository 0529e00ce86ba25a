use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::domain::errors::DomainError;
use crate::domain::ports::{NowPlayingCatalog, NowPlayingPage, NowPlayingTitle};

#[derive(Debug, Deserialize)]
struct NowPlayingResponse {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    total_pages: u32,
    #[serde(default)]
    results: Vec<NowPlayingResult>,
}

#[derive(Debug, Deserialize)]
struct NowPlayingResult {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    overview: String,
    poster_path: Option<String>,
    #[serde(default)]
    release_date: String,
}

impl From<NowPlayingResult> for NowPlayingTitle {
    fn from(r: NowPlayingResult) -> Self {
        Self {
            catalog_id: r.id,
            title: r.title,
            synopsis: r.overview,
            poster_path: r.poster_path.filter(|p| !p.is_empty()),
            release_date: r.release_date,
        }
    }
}

/// Client for TMDb's `movie/now_playing` listing.
#[derive(Clone)]
pub struct TmdbCatalog {
    http: Client,
    base_url: Url,
    api_key: String,
    language: String,
}

impl TmdbCatalog {
    pub fn new(http: Client, base_url: Url, api_key: String, language: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
            language,
        }
    }
}

#[async_trait]
impl NowPlayingCatalog for TmdbCatalog {
    async fn now_playing(&self, page: u32) -> Result<NowPlayingPage, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::Transport(format!("catalog URL {} has no path", self.base_url)))?
            .pop_if_empty()
            .extend(["movie", "now_playing"]);

        let page = page.to_string();
        let response = self
            .http
            .get(url)
            .query(&[
                ("language", self.language.as_str()),
                ("page", page.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Status(status.as_u16()));
        }
        let body: NowPlayingResponse = response.json().await?;

        Ok(NowPlayingPage {
            page: body.page,
            total_pages: body.total_pages,
            titles: body.results.into_iter().map(NowPlayingTitle::from).collect(),
        })
    }
}
