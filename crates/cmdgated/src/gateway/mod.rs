//! Request gateway for the execute endpoint.
//!
//! The gateway sits between the HTTP transport and the command registry. It
//! decodes request bodies, dispatches the named command, and converts the
//! outcome into a status code and JSON payload:
//!
//! | Status | Body | Condition |
//! |---|---|---|
//! | 200 | `{"data": "<output>"}` | command executed successfully |
//! | 400 | `{"message": "Malformed request"}` | body unreadable |
//! | 404 | `{"message": "Command not recognized"}` | no matching command |
//! | 500 | `{"message": "Unable to parse api request"}` | body not a valid request |
//! | 500 | `{"message": "Unable to successfully execute command"}` | callback failed |
//!
//! The gateway performs no socket I/O; the transport hands it the body (or
//! the error from reading it) and writes back whatever it returns.

mod errors;
mod handler;
mod request;
mod response;

pub use self::errors::{
    COMMAND_NOT_RECOGNIZED, EXECUTION_FAILED, GatewayError, MALFORMED_REQUEST, UNPARSABLE_REQUEST,
};
pub use self::handler::Gateway;
pub use self::request::ExecuteRequest;
pub use self::response::{GatewayResponse, ResponsePayload};

/// Tracing target for gateway operations.
pub(crate) const GATEWAY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::gateway");
