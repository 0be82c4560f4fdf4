//! In-process table store
//!
//! Same filter/sort semantics as the remote backend, kept in a mutex-guarded
//! map. Used for offline runs (`backend = "memory"`) and in tests.

use super::{DatastoreError, Fields, Filter, ListQuery, Record, TableStore};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<HashMap<String, Vec<Record>>>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a table in insertion order
    #[cfg(test)]
    pub fn records(&self, table: &str) -> Vec<Record> {
        self.tables
            .lock()
            .map(|tables| tables.get(table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<Record>>>, DatastoreError> {
        self.tables
            .lock()
            .map_err(|e| DatastoreError::Network(format!("memory store poisoned: {}", e)))
    }
}

fn matches(record: &Record, filter: &Filter) -> bool {
    match filter {
        Filter::FieldEqualsIgnoreCase { field, value } => {
            let wanted = value.to_lowercase();
            record
                .text(field)
                .is_some_and(|v| v.to_lowercase() == wanted)
        }
    }
}

/// Sort key: string fields compare as text, anything else as its JSON form
fn sort_key(record: &Record, field: &str) -> String {
    match record.fields.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

impl TableStore for MemoryStore {
    fn name(&self) -> &'static str {
        "Memory"
    }

    async fn list(&self, table: &str, query: ListQuery) -> Result<Vec<Record>, DatastoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<Record> = tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| query.filter.as_ref().map_or(true, |f| matches(r, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &query.sort {
            rows.sort_by_key(|r| sort_key(r, &sort.field));
            if sort.descending {
                rows.reverse();
            }
        }

        let limit = match (query.max_records, query.page_size) {
            (Some(a), Some(b)) => a.min(b),
            (a, b) => a.or(b).unwrap_or(usize::MAX),
        };
        rows.truncate(limit);
        Ok(rows)
    }

    async fn create(&self, table: &str, fields: Fields) -> Result<Record, DatastoreError> {
        let id = format!("rec{:014}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let record = Record {
            id,
            fields,
            created_time: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        };
        self.lock()?
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<Record, DatastoreError> {
        let mut tables = self.lock()?;
        let record = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| DatastoreError::Http {
                status: 404,
                body: format!("record {} not found", record_id),
            })?;

        // Partial update: only the given fields change
        for (key, value) in fields {
            record.fields.insert(key, value);
        }
        Ok(record.clone())
    }
}
