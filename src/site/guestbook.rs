// Guestbook endpoints - read recent messages, append a new one
//
// GET  /guestbook → { ok: true, items: [{ name, message, createdAt }] } newest first
// POST /guestbook { name, message, email?, createdAt? } → { ok: true, item }

use super::error::SiteError;
use super::validate::{char_len, is_valid_email, trimmed};
use super::{require_table, upstream, SiteState};
use crate::datastore::{Fields, ListQuery, Record, TableStore};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column names in the guestbook table
pub mod columns {
    pub const NAME: &str = "Nome";
    pub const EMAIL: &str = "Email";
    pub const MESSAGE: &str = "Mensagem";
    pub const CREATED_AT: &str = "CreatedAt";
    pub const NOTE: &str = "Nota";
}

/// Most recent entries returned by a read
pub const PAGE_SIZE: usize = 50;

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 80;
pub const MESSAGE_MIN: usize = 3;
pub const MESSAGE_MAX: usize = 800;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestbookItem {
    pub name: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl GuestbookItem {
    /// Blank cells count as missing, so each field falls through to the
    /// next source.
    fn from_record(record: &Record) -> Self {
        let present = |field: &str| record.text(field).filter(|s| !s.trim().is_empty());

        let created_at = present(columns::CREATED_AT)
            .map(str::to_string)
            .or_else(|| {
                record
                    .created_time
                    .clone()
                    .filter(|s| !s.trim().is_empty())
            })
            .unwrap_or_else(now_iso);

        Self {
            name: present(columns::NAME).unwrap_or("Anonymous").to_string(),
            message: present(columns::MESSAGE).unwrap_or_default().to_string(),
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GuestbookList {
    pub ok: bool,
    pub items: Vec<GuestbookItem>,
}

#[derive(Debug, Serialize)]
pub struct GuestbookCreated {
    pub ok: bool,
    pub item: GuestbookItem,
}

#[derive(Debug, Default, Deserialize)]
pub struct GuestbookRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
}

/// A validated entry ready to store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestbookEntry {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

impl GuestbookRequest {
    pub fn validate(self) -> Result<GuestbookEntry, SiteError> {
        let name = trimmed(self.name.as_deref());
        let email = trimmed(self.email.as_deref());
        let message = trimmed(self.message.as_deref());
        let created_at = self
            .created_at
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(now_iso);

        if char_len(&name) < NAME_MIN {
            return Err(SiteError::validation("Name is required."));
        }
        if char_len(&message) < MESSAGE_MIN {
            return Err(SiteError::validation("Message is required."));
        }
        if char_len(&name) > NAME_MAX {
            return Err(SiteError::validation("Name is too long."));
        }
        if char_len(&message) > MESSAGE_MAX {
            return Err(SiteError::validation("Message is too long (max 800)."));
        }
        if !email.is_empty() && !is_valid_email(&email) {
            return Err(SiteError::validation("Invalid email."));
        }

        Ok(GuestbookEntry {
            name,
            email,
            message,
            created_at,
        })
    }
}

impl GuestbookEntry {
    fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(columns::NAME.into(), Value::from(self.name.clone()));
        fields.insert(columns::EMAIL.into(), Value::from(self.email.clone()));
        fields.insert(columns::MESSAGE.into(), Value::from(self.message.clone()));
        fields.insert(columns::CREATED_AT.into(), Value::from(self.created_at.clone()));
        fields.insert(columns::NOTE.into(), Value::from(super::rsvp::SOURCE_NOTE));
        fields
    }
}

/// RFC 3339 UTC with milliseconds, e.g. `2026-09-18T15:00:00.000Z`
fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// GET /guestbook
pub async fn list_guestbook<S: TableStore>(
    State(state): State<SiteState<S>>,
) -> Result<Json<GuestbookList>, SiteError> {
    let table = require_table(
        state.tables.guestbook.as_deref(),
        "AIRTABLE_GUESTBOOK_TABLE_ID",
    )?;
    let store = &state.store;

    let records = store
        .list(
            table,
            ListQuery::new()
                .page_size(PAGE_SIZE)
                .sort_desc(columns::CREATED_AT),
        )
        .await
        .map_err(|e| upstream(store.name(), "list", e))?;

    let items: Vec<_> = records
        .iter()
        .take(PAGE_SIZE)
        .map(GuestbookItem::from_record)
        .collect();

    tracing::debug!(count = items.len(), "Guestbook read");
    Ok(Json(GuestbookList { ok: true, items }))
}

/// POST /guestbook
pub async fn sign_guestbook<S: TableStore>(
    State(state): State<SiteState<S>>,
    payload: Result<Json<GuestbookRequest>, JsonRejection>,
) -> Result<Json<GuestbookCreated>, SiteError> {
    let Json(request) = payload?;
    let entry = request.validate()?;

    let table = require_table(
        state.tables.guestbook.as_deref(),
        "AIRTABLE_GUESTBOOK_TABLE_ID",
    )?;
    let store = &state.store;
    store
        .create(table, entry.fields())
        .await
        .map_err(|e| upstream(store.name(), "create", e))?;

    tracing::info!(name = %entry.name, "Guestbook signed");

    Ok(Json(GuestbookCreated {
        ok: true,
        item: GuestbookItem {
            name: entry.name,
            message: entry.message,
            created_at: entry.created_at,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(name: &str, message: &str) -> GuestbookRequest {
        GuestbookRequest {
            name: Some(name.to_string()),
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_length_bounds() {
        assert!(request("Jo", "Hi!").validate().is_ok());
        assert_eq!(
            request("J", "Hi!").validate().unwrap_err().message(),
            "Name is required."
        );
        assert_eq!(
            request("Jo", "Hi").validate().unwrap_err().message(),
            "Message is required."
        );
        assert_eq!(
            request(&"x".repeat(81), "Hi!").validate().unwrap_err().message(),
            "Name is too long."
        );
        assert!(request(&"x".repeat(80), &"y".repeat(800)).validate().is_ok());
        assert_eq!(
            request("Jo", &"y".repeat(801)).validate().unwrap_err().message(),
            "Message is too long (max 800)."
        );
    }

    #[test]
    fn test_optional_email_checked_only_when_present() {
        let mut req = request("Jo", "Hi!");
        req.email = Some("   ".to_string());
        assert_eq!(req.validate().unwrap().email, "");

        let mut req = request("Jo", "Hi!");
        req.email = Some("not-an-email".to_string());
        assert_eq!(req.validate().unwrap_err().message(), "Invalid email.");
    }

    #[test]
    fn test_created_at_defaults_to_now() {
        let entry = request("Jo", "Hi!").validate().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.created_at).is_ok());
        assert!(entry.created_at.ends_with('Z'));

        let mut req = request("Jo", "Hi!");
        req.created_at = Some("2026-09-18T15:00:00.000Z".to_string());
        assert_eq!(req.validate().unwrap().created_at, "2026-09-18T15:00:00.000Z");
    }

    #[test]
    fn test_item_from_record_fallbacks() {
        let record = Record {
            id: "rec1".to_string(),
            fields: json!({ "Mensagem": "Parabéns!" }).as_object().cloned().unwrap(),
            created_time: Some("2026-01-01T00:00:00.000Z".to_string()),
        };
        let item = GuestbookItem::from_record(&record);
        assert_eq!(item.name, "Anonymous");
        assert_eq!(item.message, "Parabéns!");
        assert_eq!(item.created_at, "2026-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_blank_cells_fall_through_to_defaults() {
        let record = Record {
            id: "rec2".to_string(),
            fields: json!({ "Nome": "", "Mensagem": "Olá", "CreatedAt": "" })
                .as_object()
                .cloned()
                .unwrap(),
            created_time: Some("2026-02-02T10:00:00.000Z".to_string()),
        };
        let item = GuestbookItem::from_record(&record);
        assert_eq!(item.name, "Anonymous");
        assert_eq!(item.created_at, "2026-02-02T10:00:00.000Z");

        let bare = Record {
            id: "rec3".to_string(),
            fields: json!({ "Nome": "Rita", "CreatedAt": " " }).as_object().cloned().unwrap(),
            created_time: None,
        };
        let item = GuestbookItem::from_record(&bare);
        assert_eq!(item.name, "Rita");
        assert!(chrono::DateTime::parse_from_rfc3339(&item.created_at).is_ok());
    }

    #[test]
    fn test_blank_created_at_defaults_to_now() {
        let mut req = request("Jo", "Hi!");
        req.created_at = Some("   ".to_string());
        let entry = req.validate().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.created_at).is_ok());
    }
}
