//! HTTP adapter for the planning API.

use std::time::Duration;

use tokio::time::timeout;
use tracing::debug;
use url::Url;

use crate::config::PlanningConfig;
use crate::error::{PlanningError, PlanningResult};
use crate::event::{EventFields, EventType, RawEvent};
use crate::id::EventId;
use crate::reference::{Assignee, Client};
use crate::store::EventStore;
use crate::store::protocol::{
    ApiCommand, CreateEvent, DeleteEvent, ListAssignees, ListClients, ListEventTypes, ListEvents,
    UpdateEvent,
};

/// Client for the planning REST API.
pub struct HttpStore {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    timeout: Duration,
}

impl HttpStore {
    pub fn new(config: &PlanningConfig) -> PlanningResult<Self> {
        let mut base_url = Url::parse(&config.api_url)
            .map_err(|e| PlanningError::Config(format!("Invalid api_url '{}': {}", config.api_url, e)))?;

        // Relative paths are joined onto the base, which must end with a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("planning/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpStore {
            http,
            base_url,
            token: config.token()?,
            timeout: config.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send a typed request and decode its response.
    pub async fn call<C: ApiCommand>(&self, cmd: C) -> PlanningResult<C::Response> {
        timeout(self.timeout, self.call_raw(cmd))
            .await
            .map_err(|_| PlanningError::Timeout(self.timeout.as_secs()))?
    }

    async fn call_raw<C: ApiCommand>(&self, cmd: C) -> PlanningResult<C::Response> {
        let endpoint = C::endpoint();
        let url = self
            .base_url
            .join(&cmd.path())
            .map_err(|e| PlanningError::Config(format!("Invalid request path: {}", e)))?;

        debug!(method = %endpoint.method(), %url, "Planning API request");

        let mut request = self.http.request(endpoint.method(), url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if endpoint.has_body() {
            request = request.json(&cmd);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlanningError::Api {
                status: status.as_u16(),
                message: error_message(&body, status.canonical_reason()),
            });
        }

        decode_body(&body)
    }
}

/// Decode a response body; an empty body decodes as JSON `null` (for `()`).
fn decode_body<R: serde::de::DeserializeOwned>(body: &str) -> PlanningResult<R> {
    let body = match body.trim() {
        "" => "null",
        trimmed => trimmed,
    };

    serde_json::from_str(body)
        .map_err(|e| PlanningError::Serialization(format!("Failed to parse response: {}", e)))
}

/// The API answers errors with plain text; fall back to the status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    match body.trim() {
        "" => reason.unwrap_or("request failed").to_string(),
        text => text.to_string(),
    }
}

impl EventStore for HttpStore {
    async fn list_events(&self) -> PlanningResult<Vec<RawEvent>> {
        self.call(ListEvents).await
    }

    async fn create_event(&self, fields: &EventFields) -> PlanningResult<RawEvent> {
        let created = self
            .call(CreateEvent {
                fields,
                repetitions: 1,
            })
            .await?;

        created.into_iter().next().ok_or_else(|| PlanningError::Api {
            status: 500,
            message: "The planning API did not return the created event".to_string(),
        })
    }

    async fn update_event(&self, id: &EventId, fields: &EventFields) -> PlanningResult<RawEvent> {
        self.call(UpdateEvent { id, fields }).await
    }

    async fn delete_event(&self, id: &EventId) -> PlanningResult<()> {
        self.call(DeleteEvent { id }).await
    }

    async fn list_assignees(&self) -> PlanningResult<Vec<Assignee>> {
        self.call(ListAssignees).await
    }

    async fn list_clients(&self) -> PlanningResult<Vec<Client>> {
        self.call(ListClients).await
    }

    async fn list_event_types(&self) -> PlanningResult<Vec<EventType>> {
        self.call(ListEventTypes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> PlanningConfig {
        PlanningConfig {
            api_url: api_url.to_string(),
            ..PlanningConfig::default()
        }
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let store = HttpStore::new(&config("http://localhost:8080/api")).unwrap();

        assert_eq!(store.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            store.base_url().join("plannings/4").unwrap().as_str(),
            "http://localhost:8080/api/plannings/4"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpStore::new(&config("not a url")),
            Err(PlanningError::Config(_))
        ));
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let decoded: PlanningResult<()> = decode_body("  ");
        assert!(decoded.is_ok());
    }

    #[test]
    fn list_body_decodes_records() {
        let decoded: Vec<RawEvent> = decode_body(
            r#"[{"id": 1, "date": "2025-03-20", "heure_debut": "09:00", "heure_fin": "10:00", "Salarie": {"nom": "x"}}]"#,
        )
        .unwrap();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].start_time.as_deref(), Some("09:00"));
    }

    #[test]
    fn error_message_prefers_body_text() {
        assert_eq!(error_message("Planning non trouvé\n", Some("Not Found")), "Planning non trouvé");
        assert_eq!(error_message("", Some("Not Found")), "Not Found");
    }
}
