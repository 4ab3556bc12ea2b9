//! Command callbacks backed by external programs.
//!
//! [`ExecCommand`] runs a fixed program with a fixed argument prefix, appends
//! the request arguments, and returns everything the child wrote to stdout
//! and stderr as one string. The child's stdin is closed. A non-zero exit
//! status counts as a failure.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

use cmdgate_config::CommandSpec;

use crate::dispatch::{CallbackError, CommandCallback};

const EXEC_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::exec");

/// Errors raised while running an external program.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The output pipe could not be created.
    #[error("failed to create output pipe: {source}")]
    Pipe {
        /// Operating system failure.
        #[source]
        source: io::Error,
    },
    /// The program could not be started.
    #[error("failed to start '{}': {source}", .program.display())]
    Spawn {
        /// Program that was launched.
        program: PathBuf,
        /// Operating system failure.
        #[source]
        source: io::Error,
    },
    /// The child's output could not be read.
    #[error("failed to read output of '{}': {source}", .program.display())]
    Read {
        /// Program that was launched.
        program: PathBuf,
        /// Operating system failure.
        #[source]
        source: io::Error,
    },
    /// Waiting for the child failed.
    #[error("failed to wait for '{}': {source}", .program.display())]
    Wait {
        /// Program that was launched.
        program: PathBuf,
        /// Operating system failure.
        #[source]
        source: io::Error,
    },
    /// The child exited unsuccessfully.
    #[error("'{}' exited unsuccessfully ({status})", .program.display())]
    NonZeroExit {
        /// Program that was launched.
        program: PathBuf,
        /// Exit status reported by the operating system.
        status: ExitStatus,
        /// Combined output captured before the child exited.
        output: String,
    },
}

/// A callback that runs an external program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCommand {
    program: PathBuf,
    prefix_args: Vec<String>,
}

impl ExecCommand {
    /// Creates an adapter for `program`, always passing `prefix_args` first.
    pub fn new(program: impl Into<PathBuf>, prefix_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args,
        }
    }

    /// Creates an adapter from a command-line registration.
    #[must_use]
    pub fn from_spec(spec: &CommandSpec) -> Self {
        Self::new(spec.program(), spec.prefix_args().to_vec())
    }

    /// Program that is launched.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments placed before the request arguments.
    #[must_use]
    pub fn prefix_args(&self) -> &[String] {
        &self.prefix_args
    }

    /// Runs the program with the prefix arguments followed by `args`.
    ///
    /// Stdout and stderr share one pipe, so the returned text interleaves
    /// them in the order the child wrote. Invalid UTF-8 is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error when the program cannot be started, its output cannot
    /// be collected, or it exits with a non-zero status.
    pub fn run(&self, args: &[String]) -> Result<String, ExecError> {
        let (mut reader, writer) = io::pipe().map_err(|source| ExecError::Pipe { source })?;
        let stderr = writer
            .try_clone()
            .map_err(|source| ExecError::Pipe { source })?;

        let mut command = Command::new(&self.program);
        command
            .args(&self.prefix_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr);

        debug!(
            target: EXEC_TARGET,
            program = %self.program.display(),
            arg_count = self.prefix_args.len() + args.len(),
            "spawning command process"
        );

        let spawned = command.spawn();
        // The command holds our copies of the write end; reading only sees
        // EOF once they are gone.
        drop(command);
        let mut child = spawned.map_err(|source| ExecError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let mut output = Vec::new();
        let read = reader.read_to_end(&mut output);
        let status = child.wait().map_err(|source| ExecError::Wait {
            program: self.program.clone(),
            source,
        })?;
        read.map_err(|source| ExecError::Read {
            program: self.program.clone(),
            source,
        })?;

        let output = String::from_utf8_lossy(&output).into_owned();
        debug!(
            target: EXEC_TARGET,
            program = %self.program.display(),
            %status,
            output_bytes = output.len(),
            "command process exited"
        );
        if !status.success() {
            return Err(ExecError::NonZeroExit {
                program: self.program.clone(),
                status,
                output,
            });
        }
        Ok(output)
    }
}

impl CommandCallback for ExecCommand {
    fn call(&self, args: &[String]) -> Result<String, CallbackError> {
        Ok(self.run(args)?)
    }
}
