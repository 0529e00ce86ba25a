use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::lookup::Lookup;
use crate::domain::models::{Movie, RecordId, Room, Showtime};
use crate::domain::ports::{Editable, RecordStore};
use crate::domain::validation::{ShowtimeForm, ValidationContext};

use super::record_service::{delete_each, BatchDeleteReport};
use super::view_state::{Snapshot, ViewState};

/// A showtime with its movie title and room number resolved.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimeRow {
    #[schema(value_type = String)]
    pub id: RecordId,
    #[schema(value_type = String)]
    pub movie_id: RecordId,
    #[schema(value_type = String)]
    pub room_id: RecordId,
    pub date_time: String,
    pub movie_title: String,
    pub room_number: String,
}

pub fn join_board(showtimes: &[Showtime], movies: &[Movie], rooms: &[Room]) -> Vec<ShowtimeRow> {
    let movies = Lookup::build(movies);
    let rooms = Lookup::build(rooms);
    showtimes
        .iter()
        .map(|s| ShowtimeRow {
            id: s.id.clone(),
            movie_id: s.movie_id.clone(),
            room_id: s.room_id.clone(),
            date_time: s.date_time.clone(),
            movie_title: movies.display(&s.movie_id, |m| m.title.clone()),
            room_number: rooms.display(&s.room_id, |r| r.number.to_string()),
        })
        .collect()
}

fn or_empty<T>(result: Result<Vec<T>, DomainError>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::error!("Loading {} for the showtime board failed: {}", what, e);
        Vec::new()
    })
}

pub struct ShowtimeBoard<S> {
    store: Arc<S>,
    view: ViewState<ShowtimeRow>,
}

impl<S: RecordStore> ShowtimeBoard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            view: ViewState::new(),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot<ShowtimeRow>> {
        self.view.snapshot()
    }

    /// Loads the three lists concurrently and rebuilds the joined board.
    ///
    /// If the showtimes themselves cannot be loaded the previous board stays;
    /// a missing movie or room list only turns names into the sentinel.
    pub async fn reload(&self) -> Arc<Snapshot<ShowtimeRow>> {
        let (showtimes, movies, rooms) = futures::join!(
            self.store.list::<Showtime>(),
            self.store.list::<Movie>(),
            self.store.list::<Room>(),
        );

        let showtimes = match showtimes {
            Ok(showtimes) => showtimes,
            Err(e) => {
                log::warn!("Reloading showtimes failed, keeping last board: {}", e);
                return self.view.snapshot();
            }
        };
        let movies = or_empty(movies, "movies");
        let rooms = or_empty(rooms, "rooms");

        self.view.replace(join_board(&showtimes, &movies, &rooms))
    }

    // Showtime writes rebuild the joined board, which is the list the
    // showtime screen shows.

    pub async fn create(
        &self,
        form: ShowtimeForm,
        ctx: &ValidationContext,
    ) -> Result<Showtime, DomainError> {
        let draft = Showtime::validate(form, ctx)?;
        let created = self.store.create::<Showtime>(&draft).await.map_err(|e| {
            log::error!("Creating showtime failed: {}", e);
            e
        })?;
        self.reload().await;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &RecordId,
        form: ShowtimeForm,
        ctx: &ValidationContext,
    ) -> Result<Showtime, DomainError> {
        let draft = Showtime::validate(form, ctx)?;
        let updated = self
            .store
            .update::<Showtime>(id, &draft)
            .await
            .map_err(|e| {
                log::error!("Updating showtime {} failed: {}", id, e);
                e
            })?;
        self.reload().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), DomainError> {
        self.store.delete::<Showtime>(id).await.map_err(|e| {
            log::error!("Deleting showtime {} failed: {}", id, e);
            e
        })?;
        self.reload().await;
        Ok(())
    }

    /// One delete per id, concurrently, then a single board reload.
    pub async fn delete_many(&self, ids: Vec<RecordId>) -> BatchDeleteReport {
        if ids.is_empty() {
            return BatchDeleteReport::empty();
        }
        let report = delete_each::<Showtime, S>(&self.store, ids).await;
        self.reload().await;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::lookup::SENTINEL;
    use crate::test_support::{InMemoryStore, Op};

    fn ctx() -> ValidationContext {
        ValidationContext::at(
            NaiveDate::from_ymd_opt(2026, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        )
    }

    fn form(movie_id: &str, room_id: &str) -> ShowtimeForm {
        ShowtimeForm {
            movie_id: Some(RecordId::new(movie_id)),
            room_id: Some(RecordId::new(room_id)),
            date_time: "2026-12-24T21:00".into(),
        }
    }

    fn movie(id: &str, title: &str) -> Movie {
        Movie {
            id: RecordId::new(id),
            title: title.into(),
            synopsis: "Long enough synopsis".into(),
            rating: "PG".into(),
            duration: 100,
            genre: "Drama".into(),
            start_date: "2026-01-01".into(),
            end_date: "2026-02-01".into(),
        }
    }

    fn showtime(id: &str, movie_id: &str, room_id: &str) -> Showtime {
        Showtime {
            id: RecordId::new(id),
            movie_id: RecordId::new(movie_id),
            room_id: RecordId::new(room_id),
            date_time: "2026-12-24T18:00".into(),
        }
    }

    fn room(id: &str, number: u32) -> Room {
        Room {
            id: RecordId::new(id),
            number,
            capacity: 30,
        }
    }

    #[test]
    fn joins_titles_and_room_numbers() {
        let rows = join_board(
            &[showtime("s1", "m1", "r1")],
            &[movie("m1", "Heat")],
            &[room("r1", 3)],
        );
        assert_eq!(rows[0].movie_title, "Heat");
        assert_eq!(rows[0].room_number, "3");
    }

    #[test]
    fn dangling_references_show_the_sentinel() {
        let rows = join_board(&[showtime("s1", "gone", "gone")], &[], &[]);
        assert_eq!(rows[0].movie_title, SENTINEL);
        assert_eq!(rows[0].room_number, SENTINEL);
    }

    #[tokio::test]
    async fn failed_room_list_degrades_to_sentinels() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(&[movie("m1", "Heat")]);
        store.seed(&[room("r1", 3)]);
        store.seed(&[showtime("s1", "m1", "r1")]);
        store.fail(Op::List, "rooms");
        let board = ShowtimeBoard::new(store);

        let snapshot = board.reload().await;

        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].movie_title, "Heat");
        assert_eq!(snapshot.records[0].room_number, SENTINEL);
    }

    #[tokio::test]
    async fn failed_showtime_list_keeps_the_previous_board() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(&[showtime("s1", "m1", "r1")]);
        let board = ShowtimeBoard::new(store.clone());
        board.reload().await;
        store.fail(Op::List, "showtimes");

        let snapshot = board.reload().await;

        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(store.calls(Op::List, "showtimes"), 2);
    }

    #[tokio::test]
    async fn created_showtime_appears_on_the_board() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(&[movie("m1", "Heat")]);
        store.seed(&[room("r1", 3)]);
        let board = ShowtimeBoard::new(store.clone());
        assert!(board.snapshot().loaded_at.is_none());

        let created = board.create(form("m1", "r1"), &ctx()).await.expect("create");

        let snapshot = board.snapshot();
        assert!(snapshot.loaded_at.is_some());
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].id, created.id);
        assert_eq!(snapshot.records[0].movie_title, "Heat");
        assert_eq!(store.calls(Op::List, "showtimes"), 1);
    }

    #[tokio::test]
    async fn rejected_form_leaves_the_board_alone() {
        let store = Arc::new(InMemoryStore::new());
        let board = ShowtimeBoard::new(store.clone());

        let result = board.create(ShowtimeForm::default(), &ctx()).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.calls(Op::Create, "showtimes"), 0);
        assert!(board.snapshot().loaded_at.is_none());
    }

    #[tokio::test]
    async fn batch_delete_rebuilds_the_board_once() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(&[
            showtime("s1", "m1", "r1"),
            showtime("s2", "m1", "r1"),
            showtime("s3", "m1", "r1"),
        ]);
        let board = ShowtimeBoard::new(store.clone());
        board.reload().await;

        let report = board
            .delete_many(vec![RecordId::new("s1"), RecordId::new("s3")])
            .await;

        assert_eq!(report.deleted.len(), 2);
        assert_eq!(store.calls(Op::Delete, "showtimes"), 2);
        assert_eq!(store.calls(Op::List, "showtimes"), 2);
        let ids: Vec<_> = board.snapshot().records.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![RecordId::new("s2")]);
    }

    #[tokio::test]
    async fn update_and_delete_refresh_the_board() {
        let store = Arc::new(InMemoryStore::new());
        store.seed(&[movie("m2", "Alien")]);
        store.seed(&[showtime("s1", "m1", "r1")]);
        let board = ShowtimeBoard::new(store.clone());

        board
            .update(&RecordId::new("s1"), form("m2", "r1"), &ctx())
            .await
            .expect("update");
        assert_eq!(board.snapshot().records[0].movie_title, "Alien");

        board.delete(&RecordId::new("s1")).await.expect("delete");
        assert!(board.snapshot().records.is_empty());
    }
}
