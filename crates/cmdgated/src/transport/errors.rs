//! Error types for the HTTP listener.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while binding or running the HTTP listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured host could not be resolved.
    #[error("failed to resolve TCP address {host}:{port}: {source}")]
    Resolve {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
        /// Resolver failure.
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but produced no usable address.
    #[error("no TCP addresses resolved for {host}:{port}")]
    ResolveEmpty {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
    },
    /// The socket could not be bound.
    #[error("failed to bind TCP listener at {addr}: {source}")]
    BindTcp {
        /// Address the bind was attempted on.
        addr: SocketAddr,
        /// Operating system failure.
        #[source]
        source: io::Error,
    },
    /// The bound address could not be read back.
    #[error("failed to read local address of TCP listener: {source}")]
    LocalAddr {
        /// Operating system failure.
        #[source]
        source: io::Error,
    },
    /// The socket could not be switched to non-blocking mode.
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        /// Operating system failure.
        #[source]
        source: io::Error,
    },
    /// The async runtime refused the socket.
    #[error("failed to register listener with the async runtime: {source}")]
    Adopt {
        /// Runtime failure.
        #[source]
        source: io::Error,
    },
    /// The serve loop terminated with an error.
    #[error("HTTP server failed: {source}")]
    Serve {
        /// Server failure.
        #[source]
        source: io::Error,
    },
}
