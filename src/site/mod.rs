//! Site HTTP server: RSVP and guestbook endpoints
//!
//! Routes (also mounted under `/api`):
//! - `POST /rsvp`
//! - `GET  /guestbook`
//! - `POST /guestbook`
//!
//! Every response is JSON with an `ok` flag; failures carry `error`.

pub mod error;
pub mod guestbook;
pub mod locks;
pub mod rsvp;
pub mod validate;

use crate::config::{Backend, Config, DatastoreConfig};
use crate::datastore::{AirtableStore, Datastore, DatastoreError, MemoryStore, TableStore};
use anyhow::{Context, Result};
use axum::{routing::post, Router};
use error::SiteError;
use locks::KeyedLocks;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Table ids the endpoints write to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub rsvp: Option<String>,
    pub guestbook: Option<String>,
}

/// Shared state for the site handlers
#[derive(Clone)]
pub struct SiteState<S> {
    pub store: S,
    pub tables: Arc<Tables>,
    /// Serializes RSVP upserts per normalized email
    pub locks: KeyedLocks,
}

impl<S: TableStore> SiteState<S> {
    pub fn new(store: S, tables: Tables) -> Self {
        Self {
            store,
            tables: Arc::new(tables),
            locks: KeyedLocks::new(),
        }
    }
}

/// Build the site router over any table store
pub fn router<S: TableStore>(state: SiteState<S>) -> Router {
    let routes = Router::new()
        .route("/rsvp", post(rsvp::submit_rsvp::<S>))
        .route(
            "/guestbook",
            post(guestbook::sign_guestbook::<S>).get(guestbook::list_guestbook::<S>),
        );

    Router::new()
        .nest("/api", routes.clone())
        .merge(routes)
        .with_state(state)
}

/// Pick the configured backend
pub fn build_datastore(config: &DatastoreConfig) -> Result<Datastore> {
    let store = match config.backend {
        Backend::Airtable => Datastore::Airtable(
            AirtableStore::new(config.airtable_settings())
                .context("Failed to create Airtable client")?,
        ),
        Backend::Memory => Datastore::Memory(MemoryStore::new()),
    };

    if config.backend == Backend::Airtable && !config.has_credentials() {
        tracing::warn!(
            "Airtable credentials are incomplete; RSVP and guestbook requests will fail until they are set"
        );
    }

    Ok(store)
}

/// Start the site server
///
/// Runs until `shutdown_rx` fires, then drains in-flight requests.
pub async fn start_site(
    config: Config,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let store = build_datastore(&config.datastore)?;
    let tables = Tables {
        rsvp: config.datastore.rsvp_table.clone(),
        guestbook: config.datastore.guestbook_table.clone(),
    };
    tracing::info!(backend = store.name(), "Datastore ready");

    let app = router(SiteState::new(store, tables));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Site listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Site server shut down gracefully");
    Ok(())
}

/// Resolve a table setting, rejecting missing values and share-link ids
pub(crate) fn require_table<'a>(value: Option<&'a str>, setting: &str) -> Result<&'a str, SiteError> {
    let table = value
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SiteError::Upstream(format!("Missing setting: {}", setting)))?;

    if table.starts_with("shr") {
        return Err(SiteError::Upstream(format!(
            "{} looks like a share link id ('shr...'); use the table name or its 'tbl...' id",
            setting
        )));
    }
    Ok(table)
}

/// Wrap a datastore failure as a 500 naming the backend and operation
pub(crate) fn upstream(store: &str, op: &str, err: DatastoreError) -> SiteError {
    match err {
        DatastoreError::Config(msg) => SiteError::Upstream(msg),
        other => SiteError::Upstream(format!("{} {} error {}", store, op, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn memory_state() -> SiteState<MemoryStore> {
        SiteState::new(
            MemoryStore::new(),
            Tables {
                rsvp: Some("tblRsvp".to_string()),
                guestbook: Some("tblGuestbook".to_string()),
            },
        )
    }

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(b) => Body::from(b.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn rsvp_body(email: &str, attendance: &str) -> Value {
        json!({ "attendance": attendance, "name": "Ana", "email": email, "phone": "912 000 000" })
    }

    #[tokio::test]
    async fn test_guestbook_sign_and_reject_short_name() {
        let state = memory_state();

        let (status, body) = call(
            router(state.clone()),
            "POST",
            "/guestbook",
            Some(json!({ "name": "Jo", "message": "Hi!" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["item"]["name"], "Jo");
        assert_eq!(body["item"]["message"], "Hi!");
        assert!(body["item"]["createdAt"].as_str().is_some());

        let (status, body) = call(
            router(state),
            "POST",
            "/guestbook",
            Some(json!({ "name": "J", "message": "Hi!" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_guestbook_lists_newest_first() {
        let state = memory_state();
        for (name, at) in [
            ("Old", "2026-01-01T00:00:00.000Z"),
            ("New", "2026-03-01T00:00:00.000Z"),
            ("Mid", "2026-02-01T00:00:00.000Z"),
        ] {
            let (status, _) = call(
                router(state.clone()),
                "POST",
                "/api/guestbook",
                Some(json!({ "name": name, "message": "Parabéns", "createdAt": at })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = call(router(state), "GET", "/guestbook", None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["New", "Mid", "Old"]);
    }

    #[tokio::test]
    async fn test_rsvp_upserts_case_insensitively() {
        let state = memory_state();

        let (status, body) =
            call(router(state.clone()), "POST", "/rsvp", Some(rsvp_body("A@x.com", "yes"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "action": "created" }));

        let (status, body) =
            call(router(state.clone()), "POST", "/api/rsvp", Some(rsvp_body("a@X.com", "no"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "action": "updated" }));

        let rows = state.store.records("tblRsvp");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text(rsvp::columns::ATTENDING), Some("Não"));
        assert_eq!(rows[0].text(rsvp::columns::EMAIL), Some("a@X.com"));
    }

    #[tokio::test]
    async fn test_rsvp_validation_is_400() {
        let (status, body) = call(
            router(memory_state()),
            "POST",
            "/rsvp",
            Some(rsvp_body("a@x.com", "maybe")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid attendance.");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_envelope() {
        let app = router(memory_state());
        let request = Request::builder()
            .method("POST")
            .uri("/rsvp")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_missing_table_is_500() {
        let state = SiteState::new(MemoryStore::new(), Tables::default());
        let (status, body) = call(router(state), "GET", "/guestbook", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Missing setting: AIRTABLE_GUESTBOOK_TABLE_ID");
    }

    #[test]
    fn test_require_table_rejects_share_ids() {
        assert_eq!(require_table(Some(" tblX "), "T"), Ok("tblX"));
        assert!(require_table(Some(""), "T").is_err());
        let err = require_table(Some("shrAbc"), "AIRTABLE_TABLE_ID").unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("AIRTABLE_TABLE_ID"));
    }

    #[test]
    fn test_upstream_message_format() {
        let err = upstream(
            "Airtable",
            "search",
            DatastoreError::Http {
                status: 422,
                body: "{\"error\":\"INVALID\"}".to_string(),
            },
        );
        assert_eq!(err.message(), "Airtable search error (422): {\"error\":\"INVALID\"}");

        let err = upstream("Airtable", "create", DatastoreError::Config("Missing setting: AIRTABLE_TOKEN".into()));
        assert_eq!(err.message(), "Missing setting: AIRTABLE_TOKEN");
    }
}
