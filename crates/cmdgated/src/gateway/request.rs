//! Request deserialization for the execute endpoint.
//!
//! This module decodes request bodies into typed `ExecuteRequest` values. The
//! body must be a JSON object with a string `command` and an optional `args`
//! array of strings.

use serde::{Deserialize, Deserializer};

use super::errors::GatewayError;

/// Decoded execute request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecuteRequest {
    /// Name of the command to run.
    pub command: String,
    /// Arguments forwarded verbatim to the command's callback.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<String>,
}

impl ExecuteRequest {
    /// Parses a request body.
    ///
    /// Decoding is permissive about `args` (absent or `null` means no
    /// arguments) and strict about shape: the body must be an object, and
    /// `command` must be a string.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Parse` when the body is not valid JSON or does
    /// not match the request schema.
    pub fn parse(body: &[u8]) -> Result<Self, GatewayError> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(GatewayError::from_json_error)?;
        // serde would also accept `["name", []]` for a struct; only objects are requests.
        if !value.is_object() {
            return Err(GatewayError::parse("request body must be a JSON object"));
        }
        Self::deserialize(value).map_err(GatewayError::from_json_error)
    }

    /// Command name as sent by the client.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Request arguments in order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
