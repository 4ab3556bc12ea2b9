//! Command-line registrations for process-backed commands.
//!
//! Each `--command` flag takes the form `NAME=PROGRAM[,ARG...]`. The name is
//! what clients send in the `command` field; the program and the optional
//! comma-separated prefix arguments describe the subprocess that runs when the
//! command is invoked. Request arguments are appended after the prefix.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// A process-backed command registration parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    name: String,
    program: PathBuf,
    prefix_args: Vec<String>,
}

impl CommandSpec {
    /// Builds a command registration directly.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        program: impl Into<PathBuf>,
        prefix_args: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            prefix_args,
        }
    }

    /// Name clients use to invoke the command.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Program executed for each invocation.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments placed before the request arguments.
    #[must_use]
    pub fn prefix_args(&self) -> &[String] {
        &self.prefix_args
    }
}

/// Errors raised while parsing a [`CommandSpec`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandSpecError {
    /// The `=` separating the name from the program was absent.
    #[error("expected NAME=PROGRAM[,ARG...], got '{spec}'")]
    MissingSeparator {
        /// Raw value supplied on the command line.
        spec: String,
    },
    /// The command name was empty.
    #[error("command name is empty in '{spec}'")]
    EmptyName {
        /// Raw value supplied on the command line.
        spec: String,
    },
    /// The program path was empty.
    #[error("program is empty in '{spec}'")]
    EmptyProgram {
        /// Raw value supplied on the command line.
        spec: String,
    },
}

impl FromStr for CommandSpec {
    type Err = CommandSpecError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let Some((name, invocation)) = spec.split_once('=') else {
            return Err(CommandSpecError::MissingSeparator {
                spec: spec.to_owned(),
            });
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(CommandSpecError::EmptyName {
                spec: spec.to_owned(),
            });
        }

        let mut parts = invocation.split(',');
        let program = parts.next().map(str::trim).unwrap_or_default();
        if program.is_empty() {
            return Err(CommandSpecError::EmptyProgram {
                spec: spec.to_owned(),
            });
        }

        Ok(Self::new(name, program, parts.map(String::from).collect()))
    }
}
