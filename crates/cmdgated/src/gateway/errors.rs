//! Request-level failures and their mapping onto HTTP responses.
//!
//! Every failure is terminal for its request. The status codes and client
//! messages below form the observable wire contract, so they are fixed here
//! rather than derived from the underlying error text.

use axum::http::StatusCode;
use thiserror::Error;

use crate::dispatch::DispatchError;

/// Client message for an unreadable request body.
pub const MALFORMED_REQUEST: &str = "Malformed request";
/// Client message for a body that does not decode into an execute request.
pub const UNPARSABLE_REQUEST: &str = "Unable to parse api request";
/// Client message for a command name with no registration.
pub const COMMAND_NOT_RECOGNIZED: &str = "Command not recognized";
/// Client message for a callback that failed.
pub const EXECUTION_FAILED: &str = "Unable to successfully execute command";

/// Errors surfaced while serving a single execute request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The transport could not deliver the request body.
    #[error("failed to read request body: {message}")]
    TransportRead {
        /// Transport-level description of the failure.
        message: String,
    },

    /// The body is not a valid execute request.
    #[error("unable to parse request: {message}")]
    Parse {
        /// Description of the decoding failure.
        message: String,
        /// Underlying JSON error, when decoding reached the parser.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Resolution or execution of the command failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The worker running the callback terminated abnormally.
    #[error("command worker failed: {message}")]
    Worker {
        /// Description reported by the worker pool.
        message: String,
    },
}

impl GatewayError {
    /// Creates a transport read error.
    pub fn transport_read(message: impl Into<String>) -> Self {
        Self::TransportRead {
            message: message.into(),
        }
    }

    /// Creates a parse error from a serde error.
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::Parse {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a parse error with a custom message.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a worker failure.
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    /// HTTP status reported to the client.
    ///
    /// A body that fails to decode is reported as 500 rather than 400. REST
    /// convention would call it a client error, but existing clients depend
    /// on the 500 mapping, so it stays.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::TransportRead { .. } => StatusCode::BAD_REQUEST,
            Self::Parse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Dispatch(DispatchError::CommandNotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Dispatch(DispatchError::ExecutionFailed { .. }) | Self::Worker { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Fixed message reported to the client in the `message` field.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::TransportRead { .. } => MALFORMED_REQUEST,
            Self::Parse { .. } => UNPARSABLE_REQUEST,
            Self::Dispatch(DispatchError::CommandNotFound { .. }) => COMMAND_NOT_RECOGNIZED,
            Self::Dispatch(DispatchError::ExecutionFailed { .. }) | Self::Worker { .. } => {
                EXECUTION_FAILED
            }
        }
    }
}
