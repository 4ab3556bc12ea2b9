//! TCP listener serving the gateway over HTTP.

use std::future::Future;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};

use tracing::info;

use cmdgate_config::ListenAddress;

use crate::gateway::Gateway;

use super::routes::router;
use super::{ListenerError, TRANSPORT_TARGET};

/// Bound HTTP listener, ready to serve.
///
/// Binding happens eagerly so the actual port is known before serving
/// starts; with a configured port of `0` the operating system picks one.
#[derive(Debug)]
pub struct HttpListener {
    address: ListenAddress,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl HttpListener {
    /// Binds a TCP socket for `address`.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot be resolved or the bind fails.
    pub fn bind(address: &ListenAddress) -> Result<Self, ListenerError> {
        let listener = bind_tcp(address.host(), address.port())?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ListenerError::LocalAddr { source })?;
        Ok(Self {
            address: address.clone(),
            listener,
            local_addr,
        })
    }

    /// Address the listener was configured with.
    #[must_use]
    pub const fn address(&self) -> &ListenAddress {
        &self.address
    }

    /// Address the socket is actually bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves `gateway` until `shutdown` resolves.
    ///
    /// In-flight requests are allowed to finish once shutdown begins. Must
    /// be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error when the socket cannot be handed to the runtime or
    /// the server loop fails.
    pub async fn serve<F>(self, gateway: Gateway, shutdown: F) -> Result<(), ListenerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::NonBlocking { source })?;
        let listener = tokio::net::TcpListener::from_std(self.listener)
            .map_err(|source| ListenerError::Adopt { source })?;

        info!(
            target: TRANSPORT_TARGET,
            configured = %self.address,
            local_addr = %self.local_addr,
            "HTTP listener active"
        );

        axum::serve(listener, router(gateway))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ListenerError::Serve { source })?;

        info!(target: TRANSPORT_TARGET, "HTTP listener stopped");
        Ok(())
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| ListenerError::Resolve {
            host: host.to_owned(),
            port,
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| ListenerError::ResolveEmpty {
        host: host.to_owned(),
        port,
    })?;
    TcpListener::bind(addr).map_err(|source| ListenerError::BindTcp { addr, source })
}
