//! # apidiff telemetry
//!
//! Privacy-first usage telemetry for the apidiff CLI.
//!
//! ## Privacy Guarantees
//!
//! - **Anonymous**: no PII, no IP addresses, no identifiable data
//! - **Redacted at the source**: sensitive flag values and all positional
//!   arguments are scrubbed before anything leaves the machine
//! - **Opt-out First**: easy to disable with multiple methods
//! - **Fail Gracefully**: telemetry never blocks or fails the CLI
//! - **Debug Mode**: inspect events before they are sent
//!
//! ## What We Collect
//!
//! - Invoked subcommand name and explicitly-set flags (denylisted flag
//!   values are replaced with a redaction marker)
//! - Positional arguments reduced to coarse category labels such as
//!   `"file"` or `"github"`, never the path or URL itself
//! - Platform and OS family
//! - CLI version
//! - Anonymized machine ID (salted hash)
//!
//! ## What We Never Collect
//!
//! - File paths, URLs, or file content
//! - Values of flags on the denylist
//! - Environment variables
//! - User names or personal info
//! - IP addresses
//!
//! ## Opt-Out
//!
//! ```bash
//! # Via environment variable
//! export APIDIFF_NO_TELEMETRY=1
//!
//! # Universal opt-out
//! export DO_NOT_TRACK=1
//! ```
//!
//! Or via config file (`~/.apidiff/config.toml`):
//!
//! ```toml
//! [telemetry]
//! enabled = false
//! ```
//!
//! The instrumented CLI checks [`TelemetryConfig::enabled`] before invoking
//! the [`Collector`]; a failed send surfaces as a [`TelemetryError`] to the
//! caller and no further. Callers are expected to log and ignore it:
//! telemetry never aborts the instrumented command.

pub mod classify;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod machine_id;
pub mod redact;

pub use classify::classify;
pub use client::Collector;
pub use command::CommandInfo;
pub use config::{load_telemetry_config, TelemetryConfig};
pub use error::TelemetryError;
pub use events::{Envelope, TelemetryEvent, APPLICATION, KEY_EVENTS};
pub use machine_id::get_machine_id;
pub use redact::{Redactor, DEFAULT_DENYLIST, REDACTED};

/// Re-export common types
pub type Result<T> = anyhow::Result<T>;
