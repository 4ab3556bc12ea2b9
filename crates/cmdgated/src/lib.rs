//! Remote command-execution gateway.
//!
//! `cmdgated` serves a single HTTP endpoint, `POST /execute`, that accepts a
//! command name and an argument list, looks up a locally registered callback
//! for that name, runs it, and returns its output as JSON. The crate is split
//! into layers, leaves first:
//!
//! - [`dispatch`]: the [`CommandRegistry`] and the [`CommandCallback`]
//!   capability. Names resolve to the most recently registered command.
//! - [`gateway`]: decodes request bodies, dispatches them, and maps every
//!   outcome onto a fixed status code and JSON payload.
//! - [`transport`]: the axum listener that delivers bodies to the gateway.
//! - [`exec`]: a callback that runs an external program, used for commands
//!   registered on the command line.
//!
//! Bootstrap initialises structured telemetry, registers the configured
//! commands, and binds the listener. Health reporting hooks emit structured
//! events at each stage so operators can see which port was chosen and why a
//! start failed.
//!
//! Registries are owned by the server value, never global, so independent
//! gateways can run side by side in one process:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use cmdgate_config::Config;
//! use cmdgated::{CallbackError, StructuredHealthReporter, bootstrap_with};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = bootstrap_with(Config::default(), Arc::new(StructuredHealthReporter::new()))?;
//! server
//!     .registry()
//!     .register("echo", |args: &[String]| -> Result<String, CallbackError> {
//!         Ok(args.first().cloned().unwrap_or_default())
//!     });
//! server.serve(std::future::pending::<()>()).await?;
//! # Ok(())
//! # }
//! ```

mod bootstrap;
pub mod dispatch;
pub mod exec;
pub mod gateway;
mod health;
mod process;
mod telemetry;
pub mod transport;

pub use bootstrap::{BootstrapError, GatewayServer, bootstrap_with};
pub use dispatch::{CallbackError, Command, CommandCallback, CommandRegistry, DispatchError};
pub use exec::{ExecCommand, ExecError};
pub use gateway::{ExecuteRequest, Gateway, GatewayError, GatewayResponse, ResponsePayload};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, run_server};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
