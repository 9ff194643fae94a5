//! Redaction policy gate
//!
//! Post-processes built events so nothing identifying leaves the client:
//! denylisted flag values are blanked and positional arguments collapse to
//! their category labels.

use std::collections::HashSet;

use crate::classify::{classify, is_category_label};
use crate::events::TelemetryEvent;

/// Marker substituted for denylisted flag values.
pub const REDACTED: &str = "[redacted]";

/// Flag names whose values must never leave the client in cleartext.
pub const DEFAULT_DENYLIST: [&str; 8] = [
    "err-ignore",
    "warn-ignore",
    "match-path",
    "prefix-base",
    "prefix-revision",
    "strip-prefix-base",
    "strip-prefix-revision",
    "filter-extension",
];

/// Applies the redaction policy to built events.
///
/// The denylist is injected per instance so different call sites can
/// protect different flag sets.
#[derive(Debug, Clone)]
pub struct Redactor {
    denylist: HashSet<String>,
}

impl Redactor {
    pub fn new(denylist: HashSet<String>) -> Self {
        Self { denylist }
    }

    /// Redact an event in place and hand the same borrow back, so the
    /// build -> redact -> send pipeline composes without moves.
    ///
    /// Redaction is idempotent: already-redacted flag values and args that
    /// already carry a category label pass through unchanged.
    pub fn redact<'a>(&self, event: &'a mut TelemetryEvent) -> &'a mut TelemetryEvent {
        self.redact_flags(event);
        redact_args(event);
        event
    }

    fn redact_flags(&self, event: &mut TelemetryEvent) {
        for (name, value) in event.flags.iter_mut() {
            if self.denylist.contains(name) {
                *value = REDACTED.to_string();
            }
        }
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(DEFAULT_DENYLIST.iter().map(|flag| flag.to_string()).collect())
    }
}

/// Replace each positional argument with its category label.
///
/// Empty arguments and arguments that already equal a category label are
/// left untouched; arity and order are always preserved.
fn redact_args(event: &mut TelemetryEvent) {
    for arg in event.args.iter_mut() {
        if arg.is_empty() || is_category_label(arg) {
            continue;
        }
        *arg = classify(arg).to_string();
    }
}
