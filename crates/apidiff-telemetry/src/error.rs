//! Error types for the telemetry client.

/// Errors surfaced to the collector's caller.
///
/// Telemetry is best-effort: callers are expected to log and ignore these,
/// never to abort the instrumented command because of them.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The event envelope could not be encoded as JSON.
    #[error("failed to encode telemetry event: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP request could not be completed (connection refused,
    /// timeout, TLS failure).
    #[error("failed to send telemetry event: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collection endpoint answered with something other than 201.
    #[error("telemetry endpoint responded with unexpected status '{0}'")]
    UnexpectedStatus(reqwest::StatusCode),
}
