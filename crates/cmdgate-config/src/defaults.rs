//! Default values applied when a flag is omitted.

use crate::listen::ListenAddress;

/// Default interface the gateway binds to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port. Zero asks the operating system for an ephemeral port.
pub const DEFAULT_PORT: u16 = 0;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log filter used by `Config::default`; same value as [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binary.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Computes the default listen address for the gateway.
#[must_use]
pub fn default_listen_address() -> ListenAddress {
    ListenAddress::new(DEFAULT_HOST, DEFAULT_PORT)
}
