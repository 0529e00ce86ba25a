use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::models::RecordId;
use crate::domain::ports::{Editable, RecordStore, Resource};
use crate::domain::validation::ValidationContext;

use super::view_state::{Snapshot, ViewState};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BatchDeleteReport {
    pub requested: usize,
    #[schema(value_type = Vec<String>)]
    pub deleted: Vec<RecordId>,
    #[schema(value_type = Vec<String>)]
    pub failed: Vec<RecordId>,
}

impl BatchDeleteReport {
    pub fn empty() -> Self {
        Self {
            requested: 0,
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Issues one delete per id concurrently and logs each failure. Reloading is
/// left to the caller.
pub(crate) async fn delete_each<R: Resource, S: RecordStore>(
    store: &S,
    ids: Vec<RecordId>,
) -> BatchDeleteReport {
    let outcomes = join_all(ids.iter().map(|id| async move {
        let result = store.delete::<R>(id).await;
        (id, result)
    }))
    .await;

    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    for (id, result) in outcomes {
        match result {
            Ok(()) => deleted.push(id.clone()),
            Err(e) => {
                log::error!("Deleting {} record {} failed: {}", R::PATH, id, e);
                failed.push(id.clone());
            }
        }
    }

    BatchDeleteReport {
        requested: ids.len(),
        deleted,
        failed,
    }
}

/// Load → validate → write → reload workflow shared by every record screen.
pub struct RecordService<R, S> {
    store: Arc<S>,
    view: ViewState<R>,
}

impl<R: Editable, S: RecordStore> RecordService<R, S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            view: ViewState::new(),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot<R>> {
        self.view.snapshot()
    }

    /// Re-fetches the whole list. A failed reload is logged and the previous
    /// snapshot stays in place.
    pub async fn refresh(&self) -> Arc<Snapshot<R>> {
        match self.store.list::<R>().await {
            Ok(records) => self.view.replace(records),
            Err(e) => {
                log::warn!("Reloading {} failed, keeping last snapshot: {}", R::PATH, e);
                self.view.snapshot()
            }
        }
    }

    pub async fn create(&self, form: R::Form, ctx: &ValidationContext) -> Result<R, DomainError> {
        let draft = R::validate(form, ctx)?;
        let created = self.store.create::<R>(&draft).await.map_err(|e| {
            log::error!("Creating {} record failed: {}", R::PATH, e);
            e
        })?;
        self.refresh().await;
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &RecordId,
        form: R::Form,
        ctx: &ValidationContext,
    ) -> Result<R, DomainError> {
        let draft = R::validate(form, ctx)?;
        let updated = self.store.update::<R>(id, &draft).await.map_err(|e| {
            log::error!("Updating {} record {} failed: {}", R::PATH, id, e);
            e
        })?;
        self.refresh().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), DomainError> {
        self.store.delete::<R>(id).await.map_err(|e| {
            log::error!("Deleting {} record {} failed: {}", R::PATH, id, e);
            e
        })?;
        self.refresh().await;
        Ok(())
    }

    /// Deletes every id concurrently, waits for all calls to settle in
    /// whatever order they finish, then reloads the list once.
    pub async fn delete_many(&self, ids: Vec<RecordId>) -> BatchDeleteReport {
        if ids.is_empty() {
            return BatchDeleteReport::empty();
        }
        let report = delete_each::<R, S>(&self.store, ids).await;
        self.refresh().await;
        report
    }

    /// Deletes everything in a freshly reloaded list.
    pub async fn delete_all(&self) -> BatchDeleteReport {
        let current = self.refresh().await;
        let ids = current.records.iter().map(|r| r.id().clone()).collect();
        self.delete_many(ids).await
    }
}
