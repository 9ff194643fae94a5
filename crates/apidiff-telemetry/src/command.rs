//! Command introspection seam
//!
//! The CLI framework is an external collaborator: whichever parser the
//! instrumented tool uses, it reports the invocation here as a plain value
//! with the first subcommand that was actually invoked, its positional
//! arguments, and the flags the user set explicitly. Defaults that were
//! never touched on the command line should not be recorded.

use std::collections::HashMap;

/// What a single CLI invocation looked like.
#[derive(Debug, Clone, Default)]
pub struct CommandInfo {
    /// Invoked subcommand name; empty when no subcommand matched.
    pub name: String,
    /// Positional arguments, in command-line order.
    pub args: Vec<String>,
    /// Explicitly-set flags by name. Values keep their command-line
    /// rendering: booleans as `"true"`/`"false"`, numerics as decimal
    /// strings.
    pub flags: HashMap<String, String>,
}

impl CommandInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, raw: impl Into<String>) -> Self {
        self.args.push(raw.into());
        self
    }

    /// Record a flag the user set explicitly.
    pub fn flag(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.flags.insert(name.into(), value.to_string());
        self
    }
}
