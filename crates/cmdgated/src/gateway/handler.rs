//! Per-request lifecycle for the execute endpoint.
//!
//! A request moves through body read, decode, dispatch and execution. The
//! first failure ends the request and selects its response; success produces
//! a `200` with the command output. Either way exactly one
//! [`GatewayResponse`] comes out.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::dispatch::CommandRegistry;

use super::GATEWAY_TARGET;
use super::errors::GatewayError;
use super::request::ExecuteRequest;
use super::response::GatewayResponse;

/// Bridges transport bodies to the command registry.
///
/// The gateway owns a shared handle to its registry; cloning the gateway is
/// cheap and every clone dispatches against the same commands.
#[derive(Debug, Clone, Default)]
pub struct Gateway {
    registry: Arc<CommandRegistry>,
}

impl Gateway {
    /// Creates a gateway serving the commands in `registry`.
    #[must_use]
    pub const fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Registry the gateway dispatches against.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Runs the full request lifecycle.
    ///
    /// `body` is the transport's attempt to read the request body; a read
    /// failure is reported to the client as a malformed request. The matched
    /// callback runs on the calling thread.
    pub fn handle<E>(&self, body: Result<&[u8], E>) -> GatewayResponse
    where
        E: fmt::Display,
    {
        match self.process(body) {
            Ok(output) => GatewayResponse::success(output),
            Err(error) => {
                warn!(
                    target: GATEWAY_TARGET,
                    %error,
                    status = error.status_code().as_u16(),
                    "execute request failed"
                );
                GatewayResponse::from_error(&error)
            }
        }
    }

    fn process<E>(&self, body: Result<&[u8], E>) -> Result<String, GatewayError>
    where
        E: fmt::Display,
    {
        let bytes = body.map_err(|error| GatewayError::transport_read(error.to_string()))?;
        let request = ExecuteRequest::parse(bytes)?;

        debug!(
            target: GATEWAY_TARGET,
            command = request.command(),
            arg_count = request.args().len(),
            "dispatching request"
        );

        Ok(self.registry.execute(request.command(), request.args())?)
    }
}
