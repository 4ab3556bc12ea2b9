//! Process entry point: runtime construction and signal-driven shutdown.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use cmdgate_config::Config;

use crate::bootstrap::{BootstrapError, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::transport::ListenerError;

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Errors surfaced while launching or running the gateway process.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The async runtime could not be built.
    #[error("failed to start async runtime: {source}")]
    Runtime {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Bootstrap failed.
    #[error("failed to bootstrap gateway: {source}")]
    Bootstrap {
        /// Underlying bootstrap error.
        #[source]
        source: BootstrapError,
    },
    /// The server stopped with an error.
    #[error("gateway server failed: {source}")]
    Serve {
        /// Underlying listener error.
        #[source]
        source: ListenerError,
    },
}

impl From<BootstrapError> for LaunchError {
    fn from(source: BootstrapError) -> Self {
        Self::Bootstrap { source }
    }
}

impl From<ListenerError> for LaunchError {
    fn from(source: ListenerError) -> Self {
        Self::Serve { source }
    }
}

/// Runs the gateway in the foreground until an interrupt or terminate
/// signal arrives.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built, bootstrap fails, or the
/// server stops abnormally.
pub fn run_server(config: Config) -> Result<(), LaunchError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| LaunchError::Runtime { source })?;
    let reporter: Arc<dyn HealthReporter> = Arc::new(StructuredHealthReporter::new());

    let server = bootstrap_with(config, reporter)?;
    runtime.block_on(server.serve(shutdown_signal()))?;
    info!(target: PROCESS_TARGET, "gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let interrupt = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(
                target: PROCESS_TARGET,
                %error,
                "failed to listen for interrupt signal"
            );
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(
                    target: PROCESS_TARGET,
                    %error,
                    "failed to listen for terminate signal"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}
