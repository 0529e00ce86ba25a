use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::models::{Movie, MovieDraft};
use crate::domain::ports::{NowPlayingCatalog, NowPlayingTitle, RecordStore};

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w342";
pub const DISABLED_MESSAGE: &str = "TMDb API key is not configured (TMDB_API_KEY)";
const LISTING_LIMIT: usize = 20;

const IMPORTED_SYNOPSIS: &str = "Synopsis unavailable.";
const IMPORTED_RATING: &str = "General audience";
const IMPORTED_DURATION: u32 = 120;
const IMPORTED_GENRE: &str = "Now playing (TMDb)";
const FALLBACK_START_DATE: &str = "2025-01-01";
const FALLBACK_END_DATE: &str = "2025-12-31";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NowPlayingEntry {
    pub catalog_id: u64,
    pub title: String,
    pub synopsis: String,
    pub poster_url: Option<String>,
    pub release_date: String,
}

impl From<NowPlayingTitle> for NowPlayingEntry {
    fn from(t: NowPlayingTitle) -> Self {
        Self {
            catalog_id: t.catalog_id,
            poster_url: t.poster_path.map(|p| format!("{POSTER_BASE_URL}{p}")),
            title: t.title,
            synopsis: t.synopsis,
            release_date: t.release_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Movie record created for a catalog title.
pub fn import_draft(title: &NowPlayingTitle) -> MovieDraft {
    let release = title.release_date.trim();
    let synopsis = title.synopsis.trim();
    MovieDraft {
        title: title.title.clone(),
        synopsis: if synopsis.is_empty() {
            IMPORTED_SYNOPSIS.to_string()
        } else {
            synopsis.to_string()
        },
        rating: IMPORTED_RATING.to_string(),
        duration: IMPORTED_DURATION,
        genre: IMPORTED_GENRE.to_string(),
        start_date: (if release.is_empty() { FALLBACK_START_DATE } else { release }).to_string(),
        end_date: (if release.is_empty() { FALLBACK_END_DATE } else { release }).to_string(),
    }
}

pub struct NowPlayingService<C, S> {
    catalog: Option<C>,
    store: Arc<S>,
}

impl<C: NowPlayingCatalog, S: RecordStore> NowPlayingService<C, S> {
    /// `catalog` is `None` when no credential was configured.
    pub fn new(catalog: Option<C>, store: Arc<S>) -> Self {
        Self { catalog, store }
    }

    pub fn is_enabled(&self) -> bool {
        self.catalog.is_some()
    }

    async fn titles(&self) -> Result<Vec<NowPlayingTitle>, DomainError> {
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| DomainError::CatalogDisabled(DISABLED_MESSAGE.to_string()))?;
        let mut page = catalog.now_playing(1).await.map_err(|e| {
            log::error!("Fetching now-playing titles failed: {}", e);
            e
        })?;
        page.titles.truncate(LISTING_LIMIT);
        Ok(page.titles)
    }

    pub async fn list(&self) -> Result<Vec<NowPlayingEntry>, DomainError> {
        Ok(self.titles().await?.into_iter().map(NowPlayingEntry::from).collect())
    }

    /// Adds listed titles missing from the movie list. A title counts as
    /// present when a movie has the same title and the start date the import
    /// would give it.
    pub async fn import(&self) -> Result<ImportReport, DomainError> {
        let titles = self.titles().await?;
        let existing: Vec<Movie> = self.store.list().await.map_err(|e| {
            log::error!("Loading movies before import failed: {}", e);
            e
        })?;

        let mut known: HashSet<(String, String)> = existing
            .into_iter()
            .map(|m| (m.title, m.start_date))
            .collect();
        let drafts: Vec<MovieDraft> = titles
            .iter()
            .map(import_draft)
            .filter(|d| known.insert((d.title.clone(), d.start_date.clone())))
            .collect();
        let skipped = titles.len() - drafts.len();

        let results = join_all(drafts.iter().map(|d| self.store.create::<Movie>(d))).await;
        let mut imported = 0;
        let mut failed = 0;
        for (draft, result) in drafts.iter().zip(results) {
            match result {
                Ok(_) => imported += 1,
                Err(e) => {
                    log::error!("Importing '{}' failed: {}", draft.title, e);
                    failed += 1;
                }
            }
        }

        log::info!(
            "Now-playing import: {} imported, {} already present, {} failed",
            imported,
            skipped,
            failed
        );
        Ok(ImportReport {
            imported,
            skipped,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::RecordId;
    use crate::test_support::{now_playing_title, InMemoryStore, Op, StaticCatalog};

    fn catalog(titles: Vec<NowPlayingTitle>) -> Option<StaticCatalog> {
        Some(StaticCatalog { titles })
    }

    #[tokio::test]
    async fn disabled_without_a_credential() {
        let service: NowPlayingService<StaticCatalog, _> =
            NowPlayingService::new(None, Arc::new(InMemoryStore::new()));

        let result = service.list().await;

        assert!(!service.is_enabled());
        assert!(matches!(result, Err(DomainError::CatalogDisabled(ref m)) if m == DISABLED_MESSAGE));
    }

    #[tokio::test]
    async fn listing_is_capped_and_builds_poster_urls() {
        let mut titles: Vec<NowPlayingTitle> = (0..25)
            .map(|i| now_playing_title(i, &format!("Film {i}"), "2026-10-01"))
            .collect();
        titles[0].poster_path = Some("/a.jpg".into());
        let service = NowPlayingService::new(catalog(titles), Arc::new(InMemoryStore::new()));

        let entries = service.list().await.unwrap();

        assert_eq!(entries.len(), 20);
        assert_eq!(
            entries[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w342/a.jpg")
        );
        assert!(entries[1].poster_url.is_none());
    }

    #[tokio::test]
    async fn import_skips_titles_already_in_the_list() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(&[Movie {
            id: RecordId::new("m1"),
            title: "Dune".into(),
            synopsis: "Spice must flow.".into(),
            rating: "PG-13".into(),
            duration: 155,
            genre: "Sci-fi".into(),
            start_date: "2026-10-01".into(),
            end_date: "2026-10-01".into(),
        }]);
        let service = NowPlayingService::new(
            catalog(vec![
                now_playing_title(1, "Dune", "2026-10-01"),
                now_playing_title(2, "Dune", "2027-01-01"),
                now_playing_title(3, "Nosferatu", ""),
            ]),
            store.clone(),
        );

        let report = service.import().await.unwrap();

        assert_eq!(
            report,
            ImportReport {
                imported: 2,
                skipped: 1,
                failed: 0
            }
        );
        assert_eq!(store.calls(Op::Create, "movies"), 2);
        let nosferatu = store
            .records::<Movie>()
            .into_iter()
            .find(|m| m.title == "Nosferatu")
            .unwrap();
        assert_eq!(nosferatu.synopsis, "Synopsis unavailable.");
        assert_eq!(nosferatu.start_date, "2025-01-01");
        assert_eq!(nosferatu.end_date, "2025-12-31");
        assert_eq!(nosferatu.duration, 120);
    }

    #[tokio::test]
    async fn nothing_new_imports_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let service = NowPlayingService::new(
            catalog(vec![
                now_playing_title(1, "Dune", "2026-10-01"),
                now_playing_title(2, "Undated", ""),
            ]),
            store.clone(),
        );
        service.import().await.unwrap();

        let second = service.import().await.unwrap();

        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(store.records::<Movie>().len(), 2);
    }
}
