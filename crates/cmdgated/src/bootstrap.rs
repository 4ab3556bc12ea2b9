//! Gateway bootstrap orchestration.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

use cmdgate_config::Config;

use crate::dispatch::CommandRegistry;
use crate::exec::ExecCommand;
use crate::gateway::Gateway;
use crate::health::HealthReporter;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{HttpListener, ListenerError};

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The HTTP listener could not be bound.
    #[error("failed to bind HTTP listener: {source}")]
    Listener {
        /// Underlying listener error.
        #[source]
        source: ListenerError,
    },
}

/// Result of a successful bootstrap: a bound server that has not started
/// serving yet.
///
/// Commands may be registered through [`GatewayServer::registry`] before or
/// after [`GatewayServer::serve`] is called; the registry is shared with the
/// running server.
pub struct GatewayServer {
    config: Config,
    listener: HttpListener,
    gateway: Gateway,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl GatewayServer {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Address the server is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    /// Port the server is bound to; never zero once bound.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.local_addr().port()
    }

    /// Registry shared with the running server.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        self.gateway.registry()
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Serves requests until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error when the listener cannot be handed to the runtime or
    /// the server loop fails.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), ListenerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let reporter = Arc::clone(&self.reporter);
        let shutdown = async move {
            shutdown.await;
            reporter.shutdown_requested();
        };
        self.listener.serve(self.gateway, shutdown).await
    }
}

impl std::fmt::Debug for GatewayServer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("GatewayServer")
            .field("config", &self.config)
            .field("listener", &self.listener)
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}

/// Bootstraps the gateway from `config`, reporting progress to `reporter`.
///
/// Telemetry is initialised, every `--command` registration is added to a
/// fresh registry as a process-exec callback, and the listener is bound.
///
/// # Errors
///
/// Returns an error when telemetry cannot be initialised or the listener
/// cannot be bound. The failure is also reported to `reporter`.
pub fn bootstrap_with(
    config: Config,
    reporter: Arc<dyn HealthReporter>,
) -> Result<GatewayServer, BootstrapError> {
    reporter.bootstrap_starting();

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let registry = Arc::new(CommandRegistry::new());
    for spec in config.commands() {
        registry.register(spec.name(), ExecCommand::from_spec(spec));
    }

    let listener = match HttpListener::bind(&config.listen_address()) {
        Ok(listener) => listener,
        Err(source) => {
            let error = BootstrapError::Listener { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    reporter.server_listening(&config, listener.local_addr());

    Ok(GatewayServer {
        config,
        listener,
        gateway: Gateway::new(registry),
        telemetry,
        reporter,
    })
}
