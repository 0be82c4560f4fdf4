//! Remote tabular datastore
//!
//! The RSVP and guestbook endpoints persist rows in a hosted spreadsheet-like
//! store reached over HTTP. This module defines the operations they need and
//! two implementations:
//!
//! ```text
//! TableStore trait
//! ├── AirtableStore (REST API over reqwest)
//! └── MemoryStore   (in-process tables, offline/demo mode and tests)
//! ```

pub mod airtable;
pub mod memory;

pub use airtable::AirtableStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;

/// Field values of a record, keyed by column name
pub type Fields = Map<String, Value>;

/// A stored row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl Record {
    /// String value of a field, if present and a string
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }
}

/// Row filter supported by every backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Field value equals `value`, both compared lowercased
    FieldEqualsIgnoreCase { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

/// Parameters for listing records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: Option<Filter>,
    pub max_records: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<Sort>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn max_records(mut self, n: usize) -> Self {
        self.max_records = Some(n);
        self
    }

    pub fn page_size(mut self, n: usize) -> Self {
        self.page_size = Some(n);
        self
    }

    pub fn sort_desc(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            descending: true,
        });
        self
    }
}

/// Errors from a datastore backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatastoreError {
    /// Missing or invalid credentials / table settings
    Config(String),
    /// Backend answered with a non-success status
    Http { status: u16, body: String },
    /// Request never completed
    Network(String),
    /// Response body was not what we expected
    Decode(String),
}

impl fmt::Display for DatastoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "{}", msg),
            Self::Http { status, body } => write!(f, "({}): {}", status, body),
            Self::Network(msg) => write!(f, "network error: {}", msg),
            Self::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for DatastoreError {}

/// Operations the site needs from a tabular store
///
/// The futures are `Send` so handlers can run on the multi-threaded runtime.
pub trait TableStore: Clone + Send + Sync + 'static {
    /// Short backend name for logs and error messages
    fn name(&self) -> &'static str;

    fn list(
        &self,
        table: &str,
        query: ListQuery,
    ) -> impl Future<Output = Result<Vec<Record>, DatastoreError>> + Send;

    fn create(
        &self,
        table: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<Record, DatastoreError>> + Send;

    fn update(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> impl Future<Output = Result<Record, DatastoreError>> + Send;
}

/// Runtime-selected backend
///
/// Keeps the site router non-generic at the call site while both backends
/// stay statically dispatched.
#[derive(Clone)]
pub enum Datastore {
    Airtable(AirtableStore),
    Memory(MemoryStore),
}

impl TableStore for Datastore {
    fn name(&self) -> &'static str {
        match self {
            Self::Airtable(s) => s.name(),
            Self::Memory(s) => s.name(),
        }
    }

    async fn list(&self, table: &str, query: ListQuery) -> Result<Vec<Record>, DatastoreError> {
        match self {
            Self::Airtable(s) => s.list(table, query).await,
            Self::Memory(s) => s.list(table, query).await,
        }
    }

    async fn create(&self, table: &str, fields: Fields) -> Result<Record, DatastoreError> {
        match self {
            Self::Airtable(s) => s.create(table, fields).await,
            Self::Memory(s) => s.create(table, fields).await,
        }
    }

    async fn update(
        &self,
        table: &str,
        record_id: &str,
        fields: Fields,
    ) -> Result<Record, DatastoreError> {
        match self {
            Self::Airtable(s) => s.update(table, record_id, fields).await,
            Self::Memory(s) => s.update(table, record_id, fields).await,
        }
    }
}
