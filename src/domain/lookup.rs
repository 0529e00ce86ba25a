use std::collections::HashMap;

use super::models::RecordId;
use super::ports::Resource;

/// Shown in place of a foreign key that no longer resolves.
pub const SENTINEL: &str = "—";

/// Id-keyed index over one reload's worth of records.
///
/// Built once per reload so every row of a joined view resolves its foreign
/// keys in constant time against the same record set.
#[derive(Debug)]
pub struct Lookup<'a, R> {
    by_id: HashMap<&'a RecordId, &'a R>,
}

impl<'a, R: Resource> Lookup<'a, R> {
    pub fn build(records: &'a [R]) -> Self {
        Self {
            by_id: records.iter().map(|r| (r.id(), r)).collect(),
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&'a R> {
        self.by_id.get(id).copied()
    }

    /// Renders a field of the referenced record, or the sentinel when the
    /// reference is dangling.
    pub fn display<F>(&self, id: &RecordId, field: F) -> String
    where
        F: FnOnce(&R) -> String,
    {
        self.get(id).map(field).unwrap_or_else(|| SENTINEL.to_string())
    }
}
