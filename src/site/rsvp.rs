// RSVP endpoint - attendance confirmation with upsert by email
//
// POST /rsvp { attendance, name, email, phone }
//   400 { ok: false, error }           invalid input
//   200 { ok: true, action: created }  new guest
//   200 { ok: true, action: updated }  same email (any case) answered before
//   500 { ok: false, error }           datastore failure

use super::error::SiteError;
use super::validate::{char_len, is_valid_email, trimmed};
use super::{require_table, upstream, SiteState};
use crate::datastore::{Fields, Filter, ListQuery, TableStore};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column names in the RSVP table
pub mod columns {
    pub const NAME: &str = "Nome";
    pub const EMAIL: &str = "Endereço de Email";
    pub const PHONE: &str = "Contacto";
    pub const ATTENDING: &str = "Vai comparecer?";
    pub const NOTE: &str = "Nota";
}

/// Marks rows written by the site (vs. entered by hand)
pub const SOURCE_NOTE: &str = "Site";

/// Raw request body; every field optional so validation can name what's missing
#[derive(Debug, Default, Deserialize)]
pub struct RsvpRequest {
    pub attendance: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attendance {
    Yes,
    No,
}

impl Attendance {
    fn parse(value: Option<&str>) -> Option<Self> {
        match value {
            Some("yes") => Some(Self::Yes),
            Some("no") => Some(Self::No),
            _ => None,
        }
    }

    /// Value stored in the attendance column
    pub fn column_value(self) -> &'static str {
        match self {
            Self::Yes => "Sim",
            Self::No => "Não",
        }
    }
}

/// A validated submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rsvp {
    pub name: String,
    /// As typed (trimmed); stored verbatim
    pub email: String,
    pub phone: String,
    pub attendance: Attendance,
}

impl Rsvp {
    /// Upsert key: case-insensitive email
    pub fn email_key(&self) -> String {
        self.email.to_lowercase()
    }

    fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(columns::NAME.into(), Value::from(self.name.clone()));
        fields.insert(columns::EMAIL.into(), Value::from(self.email.clone()));
        fields.insert(columns::PHONE.into(), Value::from(self.phone.clone()));
        fields.insert(
            columns::ATTENDING.into(),
            Value::from(self.attendance.column_value()),
        );
        fields.insert(columns::NOTE.into(), Value::from(SOURCE_NOTE));
        fields
    }
}

impl RsvpRequest {
    pub fn validate(self) -> Result<Rsvp, SiteError> {
        let name = trimmed(self.name.as_deref());
        let email = trimmed(self.email.as_deref());
        let phone = trimmed(self.phone.as_deref());

        if char_len(&name) < 2 {
            return Err(SiteError::validation("Name is required."));
        }
        if email.is_empty() {
            return Err(SiteError::validation("Email is required."));
        }
        if !is_valid_email(&email) {
            return Err(SiteError::validation("Invalid email."));
        }
        if phone.is_empty() {
            return Err(SiteError::validation("Phone number is required."));
        }
        let attendance = Attendance::parse(self.attendance.as_deref())
            .ok_or_else(|| SiteError::validation("Invalid attendance."))?;

        Ok(Rsvp {
            name,
            email,
            phone,
            attendance,
        })
    }
}

/// What the upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertAction {
    Created,
    Updated,
}

#[derive(Debug, Serialize)]
pub struct RsvpResponse {
    pub ok: bool,
    pub action: UpsertAction,
}

/// POST /rsvp
pub async fn submit_rsvp<S: TableStore>(
    State(state): State<SiteState<S>>,
    payload: Result<Json<RsvpRequest>, JsonRejection>,
) -> Result<Json<RsvpResponse>, SiteError> {
    let Json(request) = payload?;
    let rsvp = request.validate()?;
    let action = upsert(&state, &rsvp).await?;

    tracing::info!(
        action = ?action,
        attending = ?rsvp.attendance,
        "RSVP recorded"
    );

    Ok(Json(RsvpResponse { ok: true, action }))
}

/// Search by normalized email, then update the match or create a new row
pub async fn upsert<S: TableStore>(
    state: &SiteState<S>,
    rsvp: &Rsvp,
) -> Result<UpsertAction, SiteError> {
    let table = require_table(state.tables.rsvp.as_deref(), "AIRTABLE_TABLE_ID")?;
    let key = rsvp.email_key();
    let store = &state.store;

    let _guard = state.locks.lock(&key).await;

    let query = ListQuery::new()
        .max_records(1)
        .filter(Filter::FieldEqualsIgnoreCase {
            field: columns::EMAIL.to_string(),
            value: key,
        });
    let existing = store
        .list(table, query)
        .await
        .map_err(|e| upstream(store.name(), "search", e))?;

    match existing.into_iter().next() {
        Some(record) => {
            store
                .update(table, &record.id, rsvp.fields())
                .await
                .map_err(|e| upstream(store.name(), "update", e))?;
            Ok(UpsertAction::Updated)
        }
        None => {
            store
                .create(table, rsvp.fields())
                .await
                .map_err(|e| upstream(store.name(), "create", e))?;
            Ok(UpsertAction::Created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, phone: &str, attendance: &str) -> RsvpRequest {
        RsvpRequest {
            attendance: Some(attendance.to_string()),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
        }
    }

    #[test]
    fn test_validation_order_and_messages() {
        let err = |r: RsvpRequest| r.validate().unwrap_err().message().to_string();

        assert_eq!(err(request("A", "bad", "", "maybe")), "Name is required.");
        assert_eq!(err(request("Ana", "", "", "maybe")), "Email is required.");
        assert_eq!(err(request("Ana", "ana@x", "", "maybe")), "Invalid email.");
        assert_eq!(
            err(request("Ana", "ana@x.com", "  ", "maybe")),
            "Phone number is required."
        );
        assert_eq!(
            err(request("Ana", "ana@x.com", "912", "maybe")),
            "Invalid attendance."
        );
        assert_eq!(err(RsvpRequest::default()), "Name is required.");
    }

    #[test]
    fn test_valid_request_is_trimmed() {
        let rsvp = request("  Ana  ", " Ana@X.com ", " 912 ", "no")
            .validate()
            .unwrap();
        assert_eq!(rsvp.name, "Ana");
        assert_eq!(rsvp.email, "Ana@X.com");
        assert_eq!(rsvp.email_key(), "ana@x.com");
        assert_eq!(rsvp.attendance, Attendance::No);

        let fields = rsvp.fields();
        assert_eq!(fields[columns::ATTENDING], "Não");
        assert_eq!(fields[columns::NOTE], "Site");
    }
}
