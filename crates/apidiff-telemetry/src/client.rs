//! Collector: the client-side sending pipeline
//!
//! Orchestrates build -> redact -> serialize -> POST and interprets the
//! response. Fire and mostly forget: one bounded request per invocation,
//! no retry, no buffering, no persistence on failure.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

use crate::command::CommandInfo;
use crate::config::TelemetryConfig;
use crate::error::TelemetryError;
use crate::events::{TelemetryEvent, APPLICATION, KEY_EVENTS};
use crate::redact::Redactor;

/// Upper bound on the single telemetry request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(700);

/// Client-side orchestration: build, redact, send, interpret.
///
/// All state is read-only after construction, so a `Collector` can be
/// shared freely across tasks as long as each call builds its own event.
pub struct Collector {
    events_url: String,
    redactor: Redactor,
    debug: bool,
    http: Client,
}

impl Collector {
    /// Collector with the built-in denylist.
    pub fn new(config: &TelemetryConfig) -> Self {
        Self::build_collector(config, Redactor::default())
    }

    /// Collector protecting a caller-chosen flag set.
    pub fn with_denylist(config: &TelemetryConfig, denylist: HashSet<String>) -> Self {
        Self::build_collector(config, Redactor::new(denylist))
    }

    fn build_collector(config: &TelemetryConfig, redactor: Redactor) -> Self {
        let events_url = config
            .endpoint
            .clone()
            .unwrap_or_else(default_events_url);

        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            events_url,
            redactor,
            debug: config.debug,
            http,
        }
    }

    /// The resolved events endpoint URL.
    pub fn events_url(&self) -> &str {
        &self.events_url
    }

    /// Build and send one event for a command invocation.
    pub async fn send_command(
        &self,
        app_version: &str,
        command: &CommandInfo,
    ) -> Result<(), TelemetryError> {
        self.send(TelemetryEvent::build(
            app_version,
            &command.name,
            command.args.clone(),
            command.flags.clone(),
        ))
        .await
    }

    /// Redact and send an already-built event.
    ///
    /// In debug mode the redacted event is pretty-printed to stderr and
    /// nothing is sent. Otherwise this performs exactly one network call
    /// and trusts only a 201 response.
    pub async fn send(&self, mut event: TelemetryEvent) -> Result<(), TelemetryError> {
        self.redactor.redact(&mut event);

        if self.debug {
            eprintln!(
                "telemetry event (debug mode, not sent):\n{}",
                serde_json::to_string_pretty(&event).unwrap_or_default()
            );
            return Ok(());
        }

        let body = serde_json::to_vec(&event.into_envelope())?;

        let response = self
            .http
            .post(&self.events_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(TelemetryError::UnexpectedStatus(status)),
        }
    }
}

/// Events endpoint derived from the static application identifier.
fn default_events_url() -> String {
    format!("https://telemetry.{APPLICATION}.com/{KEY_EVENTS}")
}
