//! Listen address for the HTTP gateway.

use std::fmt;

/// TCP address the HTTP gateway listens on.
///
/// A port of zero is valid and means "let the operating system choose"; the
/// bound port is only known once the listener has been created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddress {
    host: String,
    port: u16,
}

impl ListenAddress {
    /// Builds a listen address from a host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or interface address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Requested port (zero for ephemeral).
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns `true` when the operating system picks the port.
    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        self.port == 0
    }
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "tcp://[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "tcp://{}:{}", self.host, self.port)
        }
    }
}
