//! Datastore configuration: backend choice and Airtable credentials
//!
//! Credentials may live in the file, but the environment wins so deployments
//! can keep secrets out of it.

use serde::Deserialize;
use std::time::Duration;

use crate::datastore::airtable::AirtableSettings;

/// Which table store backs the endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Remote Airtable base (default)
    #[default]
    Airtable,
    /// In-process tables, lost on exit
    Memory,
}

impl Backend {
    /// Parse backend string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" => Self::Memory,
            _ => Self::Airtable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Airtable => "airtable",
            Self::Memory => "memory",
        }
    }
}

/// Datastore configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastoreConfig {
    pub backend: Backend,
    pub api_url: String,
    pub timeout: Duration,
    pub token: Option<String>,
    pub base_id: Option<String>,
    pub rsvp_table: Option<String>,
    pub guestbook_table: Option<String>,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        let airtable = AirtableSettings::default();
        Self {
            backend: Backend::default(),
            api_url: airtable.api_url,
            timeout: airtable.timeout,
            token: None,
            base_id: None,
            rsvp_table: None,
            guestbook_table: None,
        }
    }
}

/// Datastore settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDatastore {
    pub backend: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub token: Option<String>,
    pub base_id: Option<String>,
    pub rsvp_table: Option<String>,
    pub guestbook_table: Option<String>,
}

impl DatastoreConfig {
    /// Create from file config, letting env vars override credentials
    pub fn from_file(file: Option<FileDatastore>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Self {
            backend: file
                .backend
                .map(|s| Backend::from_str(&s))
                .unwrap_or(defaults.backend),
            api_url: file.api_url.unwrap_or(defaults.api_url),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            token: non_empty(env("AIRTABLE_TOKEN").or(file.token)),
            base_id: non_empty(env("AIRTABLE_BASE_ID").or(file.base_id)),
            rsvp_table: non_empty(env("AIRTABLE_TABLE_ID").or(file.rsvp_table)),
            guestbook_table: non_empty(env("AIRTABLE_GUESTBOOK_TABLE_ID").or(file.guestbook_table)),
        }
    }

    pub fn airtable_settings(&self) -> AirtableSettings {
        AirtableSettings {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            base_id: self.base_id.clone(),
            timeout: self.timeout,
        }
    }

    /// Token and base id are both present
    pub fn has_credentials(&self) -> bool {
        self.token.is_some() && self.base_id.is_some()
    }
}
