//! HTTP client for the notes backend.
//!
//! One generic [`NotesApiClient::request`] does the JSON plumbing and error
//! surfacing; the typed endpoints sit on top of it. There are no retries,
//! timeouts, or caches: every call is one request-response cycle.

use reqwest::header::{ACCEPT, CONTENT_LENGTH};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{NewNote, Note, UpgradeOutcome};
use crate::util::{compact_text, normalize_base_url};

pub const NOTES_PATH: &str = "/api/notes";
pub const PREMIUM_UPGRADE_PATH: &str = "/api/notes/premium-upgrade";

/// Operations the page needs from a notes backend.
#[allow(async_fn_in_trait)]
pub trait NotesBackend {
    /// Fetch every note, in the order the backend returns them
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Create a note; `None` when the backend answers without a body
    async fn create_note(&self, note: &NewNote) -> Result<Option<Note>>;

    /// Ask the backend for a premium upgrade
    async fn premium_upgrade(&self) -> Result<UpgradeOutcome>;
}

/// reqwest-backed client for the notes API.
#[derive(Debug, Clone)]
pub struct NotesApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotesApiClient {
    /// Builds a client for an explicit API base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url =
            normalize_base_url(base_url.into().as_str()).map_err(Error::InvalidConfiguration)?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self { base_url, client })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request and decode the JSON answer.
    ///
    /// The body, when given, is sent as JSON. Any non-2xx status becomes
    /// [`Error::Api`]. A 204, a zero `Content-Length`, or a blank body is a
    /// successful `None`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<T>> {
        let result = self.send(method.clone(), path, body).await;
        if let Err(error) = &result {
            tracing::error!(%method, path, %error, "API request failed");
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<T>> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let empty_by_header = response
            .headers()
            .get(CONTENT_LENGTH)
            .is_some_and(|value| value.as_bytes() == b"0");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %compact_text(&body), "error body");
            return Err(Error::Api {
                status: status.as_u16(),
                message: parse_api_error(status, &body),
            });
        }

        if status == StatusCode::NO_CONTENT || empty_by_header {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}

impl NotesBackend for NotesApiClient {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let notes = self
            .request::<Vec<Note>>(Method::GET, NOTES_PATH, None)
            .await?;
        Ok(notes.unwrap_or_default())
    }

    async fn create_note(&self, note: &NewNote) -> Result<Option<Note>> {
        let body = serde_json::to_value(note)?;
        self.request(Method::POST, NOTES_PATH, Some(&body)).await
    }

    async fn premium_upgrade(&self) -> Result<UpgradeOutcome> {
        self.request::<UpgradeOutcome>(Method::POST, PREMIUM_UPGRADE_PATH, None)
            .await?
            .ok_or_else(|| Error::UnexpectedResponse("premium upgrade returned no body".to_string()))
    }
}

/// Pick the message for a failed response.
///
/// Any JSON body is inspected for a truthy `error` value: strings are used
/// as is, other values as their JSON text. JSON without one falls back to the
/// numeric status; a body that is not JSON falls back to the status text.
fn parse_api_error(status: StatusCode, body: &str) -> String {
    let fallback = || format!("HTTP error! status: {}", status.as_u16());

    match serde_json::from_str::<Value>(body) {
        Ok(payload) => payload
            .get("error")
            .and_then(error_message)
            .unwrap_or_else(fallback),
        Err(_) => status
            .canonical_reason()
            .map_or_else(fallback, ToString::to_string),
    }
}

fn error_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
