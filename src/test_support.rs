//! In-memory stand-ins for the remote collaborators.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::models::RecordId;
use crate::domain::ports::{
    NowPlayingCatalog, NowPlayingPage, NowPlayingTitle, RecordStore, Resource,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    ListBy,
    Get,
    Create,
    Update,
    Delete,
}

/// Behaves like a json-server instance: records are JSON objects keyed by a
/// server-assigned `id`, and filters compare fields as text.
#[derive(Default)]
pub struct InMemoryStore {
    collections: Mutex<HashMap<&'static str, Vec<Value>>>,
    next_id: AtomicU64,
    calls: Mutex<Vec<(Op, &'static str)>>,
    failing: Mutex<HashSet<(Op, &'static str)>>,
    failing_deletes: Mutex<HashSet<String>>,
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decode<R: Resource>(value: Value) -> Result<R, DomainError> {
    serde_json::from_value(value).map_err(|e| DomainError::Decode(e.to_string()))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed<R: Resource>(&self, records: &[R]) {
        let values = records
            .iter()
            .map(|r| serde_json::to_value(r).expect("seed record serializes"));
        self.collections
            .lock()
            .unwrap()
            .entry(R::PATH)
            .or_default()
            .extend(values);
    }

    pub fn records<R: Resource>(&self) -> Vec<R> {
        self.collections
            .lock()
            .unwrap()
            .get(R::PATH)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|v| decode(v).expect("stored record decodes"))
            .collect()
    }

    pub fn fail(&self, op: Op, path: &'static str) {
        self.failing.lock().unwrap().insert((op, path));
    }

    pub fn fail_delete_of(&self, id: &str) {
        self.failing_deletes.lock().unwrap().insert(id.to_string());
    }

    pub fn calls(&self, op: Op, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, p)| *o == op && *p == path)
            .count()
    }

    fn enter(&self, op: Op, path: &'static str) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push((op, path));
        if self.failing.lock().unwrap().contains(&(op, path)) {
            Err(DomainError::Status(500))
        } else {
            Ok(())
        }
    }

    fn position(&self, path: &'static str, id: &RecordId) -> Option<usize> {
        self.collections.lock().unwrap().get(path).and_then(|rows| {
            rows.iter()
                .position(|v| v.get("id").and_then(as_text).as_deref() == Some(id.as_str()))
        })
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list<R: Resource>(&self) -> Result<Vec<R>, DomainError> {
        self.enter(Op::List, R::PATH)?;
        let rows = self
            .collections
            .lock()
            .unwrap()
            .get(R::PATH)
            .cloned()
            .unwrap_or_default();
        rows.into_iter().map(decode::<R>).collect()
    }

    async fn list_by<R: Resource>(
        &self,
        field: &str,
        value: &RecordId,
    ) -> Result<Vec<R>, DomainError> {
        self.enter(Op::ListBy, R::PATH)?;
        let rows = self
            .collections
            .lock()
            .unwrap()
            .get(R::PATH)
            .cloned()
            .unwrap_or_default();
        rows.into_iter()
            .filter(|v| v.get(field).and_then(as_text).as_deref() == Some(value.as_str()))
            .map(decode::<R>)
            .collect()
    }

    async fn get<R: Resource>(&self, id: &RecordId) -> Result<R, DomainError> {
        self.enter(Op::Get, R::PATH)?;
        let index = self.position(R::PATH, id).ok_or(DomainError::NotFound)?;
        let row = self.collections.lock().unwrap()[R::PATH][index].clone();
        decode(row)
    }

    async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, DomainError> {
        self.enter(Op::Create, R::PATH)?;
        let mut row = serde_json::to_value(draft).map_err(|e| DomainError::Decode(e.to_string()))?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        row["id"] = Value::String(format!("{}-{id}", R::PATH));
        self.collections
            .lock()
            .unwrap()
            .entry(R::PATH)
            .or_default()
            .push(row.clone());
        decode(row)
    }

    async fn update<R: Resource>(
        &self,
        id: &RecordId,
        draft: &R::Draft,
    ) -> Result<R, DomainError> {
        self.enter(Op::Update, R::PATH)?;
        let index = self.position(R::PATH, id).ok_or(DomainError::Status(404))?;
        let mut row = serde_json::to_value(draft).map_err(|e| DomainError::Decode(e.to_string()))?;
        row["id"] = Value::String(id.to_string());
        self.collections
            .lock()
            .unwrap()
            .get_mut(R::PATH)
            .expect("collection exists")[index] = row.clone();
        decode(row)
    }

    async fn delete<R: Resource>(&self, id: &RecordId) -> Result<(), DomainError> {
        self.enter(Op::Delete, R::PATH)?;
        if self.failing_deletes.lock().unwrap().contains(id.as_str()) {
            return Err(DomainError::Transport("connection reset".into()));
        }
        let index = self.position(R::PATH, id).ok_or(DomainError::Status(404))?;
        self.collections
            .lock()
            .unwrap()
            .get_mut(R::PATH)
            .expect("collection exists")
            .remove(index);
        Ok(())
    }
}

/// Fixed now-playing listing.
pub struct StaticCatalog {
    pub titles: Vec<NowPlayingTitle>,
}

#[async_trait]
impl NowPlayingCatalog for StaticCatalog {
    async fn now_playing(&self, page: u32) -> Result<NowPlayingPage, DomainError> {
        Ok(NowPlayingPage {
            page,
            total_pages: 1,
            titles: self.titles.clone(),
        })
    }
}

pub fn now_playing_title(catalog_id: u64, title: &str, release_date: &str) -> NowPlayingTitle {
    NowPlayingTitle {
        catalog_id,
        title: title.to_string(),
        synopsis: String::new(),
        poster_path: None,
        release_date: release_date.to_string(),
    }
}
