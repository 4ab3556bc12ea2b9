//! HTTP transport for the gateway.
//!
//! The transport binds the configured TCP address, routes `POST /execute`
//! into the [`Gateway`](crate::gateway::Gateway), and writes the returned
//! status and JSON body back to the client. Callbacks run on Tokio's blocking
//! pool so slow commands never stall the accept loop.

mod errors;
mod listener;
mod routes;

pub use self::errors::ListenerError;
pub use self::listener::HttpListener;
pub use self::routes::{EXECUTE_PATH, router};

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
