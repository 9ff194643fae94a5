//! Telemetry event model and builder

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::machine_id;

/// Static identifier of the instrumented application.
pub const APPLICATION: &str = "apidiff";

/// Well-known key wrapping events in the wire envelope.
pub const KEY_EVENTS: &str = "events";

/// Environment variable overriding platform detection.
pub const ENV_PLATFORM: &str = "PLATFORM";

/// Sentinel for identifiers that could not be resolved.
pub const NA: &str = "na";

/// Wire envelope: the well-known events key mapping to a batch of events.
///
/// Modeled as a map rather than a fixed struct so the ingress side can
/// count distinct top-level keys.
pub type Envelope = HashMap<String, Vec<TelemetryEvent>>;

/// One structured, anonymized record of a single CLI invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Unique identifier. The ingress side overwrites whatever the client
    /// set, so only server-assigned ids ever reach the log sink.
    pub id: String,
    /// Creation timestamp (ISO-8601 / RFC 3339, UTC), assigned once at
    /// build time and immutable thereafter.
    pub time: DateTime<Utc>,
    /// Opaque per-installation identifier, or `"na"` when unavailable.
    pub machine_id: String,
    /// Operating-system family of the invoking process.
    pub runtime: String,
    /// Deployment context: `PLATFORM` override, `"dockerenv"`, or `"na"`.
    pub platform: String,
    /// Name of the invoked subcommand; empty if none matched.
    pub command: String,
    /// Classified argument categories, same length and order as the
    /// original positional arguments.
    pub args: Vec<String>,
    /// Flag name to value. Denylisted values are redacted before sending.
    pub flags: HashMap<String, String>,
    /// Static identifier of the instrumented tool.
    pub application: String,
    /// Release version of the instrumented tool.
    pub application_version: String,
}

impl TelemetryEvent {
    /// Build a raw, un-redacted event for one command invocation.
    ///
    /// Machine-id failures are substituted with `"na"` rather than
    /// propagated; telemetry must never fail the CLI.
    pub fn build(
        app_version: &str,
        command: &str,
        args: Vec<String>,
        flags: HashMap<String, String>,
    ) -> Self {
        let machine_id = machine_id::get_machine_id().unwrap_or_else(|err| {
            tracing::debug!("failed to resolve machine id: {err}");
            NA.to_string()
        });

        Self {
            id: Uuid::new_v4().to_string(),
            time: Utc::now(),
            machine_id,
            runtime: std::env::consts::OS.to_string(),
            platform: platform(),
            command: command.to_string(),
            args,
            flags,
            application: format!("{APPLICATION}-cli"),
            application_version: app_version.to_string(),
        }
    }

    /// Wrap this event in a single-event wire envelope.
    pub fn into_envelope(self) -> Envelope {
        HashMap::from([(KEY_EVENTS.to_string(), vec![self])])
    }
}

/// Deployment context of the running process.
///
/// Environment override first, then the container marker file. Probe
/// failures (e.g. permission denied) read the same as an absent marker.
fn platform() -> String {
    if let Ok(platform) = std::env::var(ENV_PLATFORM) {
        if !platform.is_empty() {
            return platform;
        }
    }

    if Path::new("/.dockerenv").exists() {
        return "dockerenv".to_string();
    }

    NA.to_string()
}
