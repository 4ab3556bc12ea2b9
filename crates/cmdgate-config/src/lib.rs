//! Shared configuration for the command gateway.
//!
//! The gateway is configured exclusively from the command line: there is no
//! configuration file and no environment-variable layer. [`Config`] is a
//! `clap` parser so the binary and the tests resolve flags identically, and
//! every field has a built-in default so `cmdgated` with no arguments binds an
//! ephemeral port on all interfaces and logs JSON at `info`.

mod command_spec;
mod defaults;
mod listen;
mod logging;

use std::ffi::OsString;

use clap::Parser;

pub use command_spec::{CommandSpec, CommandSpecError};
pub use defaults::{
    DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT, default_listen_address, default_log_filter,
    default_log_format,
};
pub use listen::ListenAddress;
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "cmdgated",
    version,
    about = "Serves registered commands over HTTP at POST /execute"
)]
pub struct Config {
    /// Host or interface address the HTTP listener binds to.
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
    /// Port to listen on; 0 lets the operating system choose one.
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Tracing filter expression (for example `info` or `cmdgated=debug`).
    #[arg(long = "log-filter", default_value = DEFAULT_LOG_FILTER)]
    pub log_filter: String,
    /// Log output format: `json` or `compact`.
    #[arg(long = "log-format", default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,
    /// Registers a process-backed command; repeat for several commands.
    #[arg(long = "command", value_name = "NAME=PROGRAM[,ARG...]")]
    pub commands: Vec<CommandSpec>,
}

impl Config {
    /// Parses the configuration from the process arguments.
    ///
    /// # Errors
    ///
    /// Returns the `clap` error describing the invalid or missing flag. Help
    /// and version requests are reported through the same channel.
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Parses the configuration from an explicit argument list. The first
    /// item is treated as the binary name.
    ///
    /// # Errors
    ///
    /// Returns the `clap` error describing the invalid or missing flag.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Address the gateway binds to.
    #[must_use]
    pub fn listen_address(&self) -> ListenAddress {
        ListenAddress::new(self.host.clone(), self.port)
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Process-backed commands requested on the command line.
    #[must_use]
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }
}

impl Default for Config {
    fn default() -> Self {
        let address = default_listen_address();
        Self {
            host: address.host().to_owned(),
            port: address.port(),
            log_filter: default_log_filter().to_owned(),
            log_format: default_log_format(),
            commands: Vec::new(),
        }
    }
}
