//! Named commands and the callback capability they wrap.

use std::error::Error;
use std::fmt;

/// Opaque failure reported by a command callback.
///
/// Dispatch never inspects this value beyond recording that the callback
/// failed, so any error type can be boxed into it.
pub type CallbackError = Box<dyn Error + Send + Sync + 'static>;

/// Executable behaviour bound to a command name.
///
/// Callbacks receive the request arguments in order and return either the
/// text to send back as `data` or a failure. They run synchronously on the
/// thread that performs the dispatch and may block.
pub trait CommandCallback: Send + Sync {
    /// Invokes the callback with the request arguments.
    ///
    /// # Errors
    ///
    /// Returns any failure the callback wants surfaced as an execution error.
    fn call(&self, args: &[String]) -> Result<String, CallbackError>;
}

impl<F> CommandCallback for F
where
    F: Fn(&[String]) -> Result<String, CallbackError> + Send + Sync,
{
    fn call(&self, args: &[String]) -> Result<String, CallbackError> {
        self(args)
    }
}

/// A registered command: a name and the callback it resolves to.
///
/// Commands are immutable once created; shadowing happens by registering a
/// new command under the same name.
pub struct Command {
    name: String,
    callback: Box<dyn CommandCallback>,
}

impl Command {
    /// Creates a command binding `name` to `callback`.
    pub fn new(name: impl Into<String>, callback: impl CommandCallback + 'static) -> Self {
        Self {
            name: name.into(),
            callback: Box::new(callback),
        }
    }

    /// The name clients use to invoke this command.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the callback with the supplied arguments.
    ///
    /// # Errors
    ///
    /// Propagates the callback's failure unchanged.
    pub fn invoke(&self, args: &[String]) -> Result<String, CallbackError> {
        self.callback.call(args)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Command")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
