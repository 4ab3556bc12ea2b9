//! Command registry and dispatch.
//!
//! This layer owns the mapping from command names to callbacks. It resolves a
//! name, invokes the matching callback with the request arguments, and reports
//! the outcome as `Result<String, DispatchError>`. It performs no I/O; the
//! gateway layer turns outcomes into HTTP status codes and JSON payloads.
//!
//! ## Name resolution
//!
//! The registry is an ordered list. Lookup walks the whole list and keeps the
//! last entry whose name matches, so re-registering a name shadows the earlier
//! command without removing it.

mod command;
mod errors;
mod registry;

pub use self::command::{CallbackError, Command, CommandCallback};
pub use self::errors::DispatchError;
pub use self::registry::CommandRegistry;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
