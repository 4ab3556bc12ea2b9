//! BDD test world: owns a runtime, a bootstrapped gateway and the last
//! response seen by the client.

use std::cell::RefCell;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use cmdgate_config::Config;

use crate::bootstrap::{BootstrapError, bootstrap_with};
use crate::dispatch::{CallbackError, CommandRegistry};
use crate::transport::ListenerError;

use super::http::{RawResponse, post_execute, send_raw};
use super::reporter::RecordingHealthReporter;

struct RunningServer {
    addr: SocketAddr,
    registry: Arc<CommandRegistry>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), ListenerError>>,
}

/// Scenario world shared across BDD steps.
pub(crate) struct GatewayWorld {
    runtime: Runtime,
    pub(crate) reporter: Arc<RecordingHealthReporter>,
    port: u16,
    command_flags: Vec<String>,
    reserved: Option<TcpListener>,
    server: Option<RunningServer>,
    bootstrap_error: Option<BootstrapError>,
    serve_result: Option<Result<(), ListenerError>>,
    response: Option<RawResponse>,
}

impl GatewayWorld {
    /// Builds a world with no server running.
    pub(crate) fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("build test runtime");
        Self {
            runtime,
            reporter: Arc::new(RecordingHealthReporter::default()),
            port: 0,
            command_flags: Vec::new(),
            reserved: None,
            server: None,
            bootstrap_error: None,
            serve_result: None,
            response: None,
        }
    }

    /// Adds a `--command` flag for the next start.
    pub(crate) fn add_command_flag(&mut self, spec: &str) {
        self.command_flags.push(spec.to_owned());
    }

    /// Occupies a loopback port and points the next start at it.
    pub(crate) fn reserve_port(&mut self) {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind reserved port");
        self.port = listener.local_addr().expect("local addr").port();
        self.reserved = Some(listener);
    }

    /// Bootstraps the gateway on loopback and starts serving.
    pub(crate) fn start(&mut self) {
        let mut args = vec![
            String::from("cmdgated"),
            String::from("--host"),
            String::from("127.0.0.1"),
            String::from("--port"),
            self.port.to_string(),
        ];
        for spec in &self.command_flags {
            args.push(String::from("--command"));
            args.push(spec.clone());
        }
        let config = Config::load_from_iter(args).expect("scenario flags parse");

        match bootstrap_with(config, self.reporter.clone()) {
            Ok(server) => {
                let addr = server.local_addr();
                let registry = Arc::clone(server.registry());
                let (stop, stopped) = oneshot::channel::<()>();
                let task = self.runtime.spawn(server.serve(async move {
                    // A dropped sender stops the server too.
                    stopped.await.ok();
                }));
                self.server = Some(RunningServer {
                    addr,
                    registry,
                    stop,
                    task,
                });
            }
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Registers a closure on the running server.
    pub(crate) fn register<F>(&self, name: &str, callback: F)
    where
        F: Fn(&[String]) -> Result<String, CallbackError> + Send + Sync + 'static,
    {
        self.running().registry.register(name, callback);
    }

    /// Posts `body` to `/execute` and stores the response.
    pub(crate) fn post(&mut self, body: &str) {
        let addr = self.running().addr;
        self.response = Some(self.runtime.block_on(post_execute(addr, body)));
    }

    /// Sends an arbitrary request and stores the response.
    pub(crate) fn request(&mut self, method: &str, path: &str) {
        let addr = self.running().addr;
        self.response = Some(self.runtime.block_on(send_raw(addr, method, path, "")));
    }

    /// Signals shutdown and waits for the server to stop.
    pub(crate) fn stop(&mut self) {
        if let Some(server) = self.server.take() {
            // The task may already have exited; joining reports why.
            server.stop.send(()).ok();
            let joined = self.runtime.block_on(server.task).expect("server task joins");
            self.serve_result = Some(joined);
        }
    }

    pub(crate) fn addr(&self) -> SocketAddr {
        self.running().addr
    }

    pub(crate) fn response(&self) -> &RawResponse {
        self.response.as_ref().expect("a request should have been sent")
    }

    pub(crate) fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    pub(crate) fn serve_result(&self) -> Option<&Result<(), ListenerError>> {
        self.serve_result.as_ref()
    }

    fn running(&self) -> &RunningServer {
        self.server.as_ref().expect("gateway should be running")
    }
}

impl Drop for GatewayWorld {
    fn drop(&mut self) {
        if let Some(server) = self.server.take() {
            // Teardown is best effort.
            server.stop.send(()).ok();
            self.runtime.block_on(server.task).ok();
        }
        self.reserved = None;
    }
}

/// Default test world fixture.
pub(crate) fn world() -> RefCell<GatewayWorld> {
    RefCell::new(GatewayWorld::new())
}
