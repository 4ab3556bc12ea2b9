//! Ordered command registry with last-registration-wins lookup.
//!
//! The registry is an append-only list. Registering a name that already
//! exists does not replace the earlier entry; both stay stored, and lookup
//! resolves to whichever was registered most recently. Registration may race
//! with in-flight dispatches: each entry is fully built before the write lock
//! is taken, so readers see the list either before or after the append.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::DISPATCH_TARGET;
use super::command::{Command, CommandCallback};
use super::errors::DispatchError;

/// Registry of commands available to a single gateway instance.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: RwLock<Vec<Arc<Command>>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command binding `name` to `callback`.
    ///
    /// Names are not validated and duplicates are accepted; a later
    /// registration shadows earlier ones for lookup.
    pub fn register(&self, name: impl Into<String>, callback: impl CommandCallback + 'static) {
        let command = Arc::new(Command::new(name, callback));
        debug!(
            target: DISPATCH_TARGET,
            command = command.name(),
            "registering command"
        );
        self.write().push(command);
    }

    /// Resolves `name` to the most recently registered matching command.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::CommandNotFound`] when no entry matches.
    pub fn resolve(&self, name: &str) -> Result<Arc<Command>, DispatchError> {
        let commands = self.read();
        // The scan never stops early: each later match replaces the previous
        // one, which is what makes the newest registration win.
        let mut found = None;
        for command in commands.iter() {
            if command.name() == name {
                found = Some(Arc::clone(command));
            }
        }
        found.ok_or_else(|| DispatchError::not_found(name))
    }

    /// Resolves `name` and invokes its callback with `args`.
    ///
    /// The registry lock is released before the callback runs, so a slow
    /// callback only delays its own caller.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::CommandNotFound`] when the name is unknown and
    /// [`DispatchError::ExecutionFailed`] when the callback fails.
    pub fn execute(&self, name: &str, args: &[String]) -> Result<String, DispatchError> {
        let command = self.resolve(name)?;
        debug!(
            target: DISPATCH_TARGET,
            command = name,
            arg_count = args.len(),
            "invoking command"
        );
        command
            .invoke(args)
            .map_err(|source| DispatchError::execution_failed(name, source))
    }

    /// Number of stored commands, shadowed entries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Commands are immutable after construction, so a panic in another
    // holder cannot leave the list half-updated; poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Arc<Command>>> {
        self.commands.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Arc<Command>>> {
        self.commands.write().unwrap_or_else(PoisonError::into_inner)
    }
}
