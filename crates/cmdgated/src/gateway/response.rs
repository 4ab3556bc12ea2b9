//! Response payloads for the execute endpoint.
//!
//! Every request produces exactly one [`GatewayResponse`]: a status code and
//! one of two payload shapes, `{"data": ...}` on success or
//! `{"message": ...}` on failure.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::errors::GatewayError;

/// JSON body sent back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    /// Output of a successful command.
    Data {
        /// Text returned by the callback.
        data: String,
    },
    /// Fixed description of a failure.
    Message {
        /// Client-facing message.
        message: String,
    },
}

/// Status code and payload chosen for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// JSON payload.
    pub payload: ResponsePayload,
}

impl GatewayResponse {
    /// Builds a `200 OK` response carrying the command output.
    #[must_use]
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            payload: ResponsePayload::Data {
                data: output.into(),
            },
        }
    }

    /// Builds a message response with an explicit status.
    #[must_use]
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            payload: ResponsePayload::Message {
                message: message.into(),
            },
        }
    }

    /// Builds the response reported for a failed request.
    #[must_use]
    pub fn from_error(error: &GatewayError) -> Self {
        Self::message(error.status_code(), error.client_message())
    }

    /// Serializes the payload to its JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.payload)
    }
}
