//! Error types for command dispatch failures.

use thiserror::Error;

use super::command::CallbackError;

/// Errors surfaced while resolving or executing a registered command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered command carries the requested name.
    #[error("unknown command: {name}")]
    CommandNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The matched callback reported a failure.
    #[error("command '{name}' failed: {source}")]
    ExecutionFailed {
        /// Name of the command that failed.
        name: String,
        /// Opaque failure reported by the callback.
        #[source]
        source: CallbackError,
    },
}

impl DispatchError {
    /// Creates a command-not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::CommandNotFound { name: name.into() }
    }

    /// Creates an execution failure wrapping the callback's error.
    pub fn execution_failed(name: impl Into<String>, source: CallbackError) -> Self {
        Self::ExecutionFailed {
            name: name.into(),
            source,
        }
    }

    /// Name of the command the error refers to.
    #[must_use]
    pub fn command_name(&self) -> &str {
        match self {
            Self::CommandNotFound { name } | Self::ExecutionFailed { name, .. } => name,
        }
    }
}
