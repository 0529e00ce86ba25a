use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// The last list a view received from the store.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub records: Vec<T>,
    /// `None` until the first successful reload.
    pub loaded_at: Option<DateTime<Utc>>,
}

impl<T> Snapshot<T> {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            loaded_at: None,
        }
    }
}

/// State container for one console view.
///
/// Readers get a cheap `Arc` of the current snapshot; each store round-trip
/// swaps in a whole new snapshot, so no reader ever sees a half-updated list.
#[derive(Debug)]
pub struct ViewState<T> {
    current: RwLock<Arc<Snapshot<T>>>,
}

impl<T> ViewState<T> {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::empty())),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot<T>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, records: Vec<T>) -> Arc<Snapshot<T>> {
        let next = Arc::new(Snapshot {
            records,
            loaded_at: Some(Utc::now()),
        });
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = next.clone();
        next
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}
