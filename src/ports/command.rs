//! Command executor port for running the CLI under test.

use std::collections::BTreeMap;

use crate::context::ServiceContext;
use crate::error::PortError;

/// Captured result of one CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// The exit code of the command.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

/// Everything an executor needs to run one command.
pub struct Invocation<'a> {
    /// Full argument vector, starting with the entry point.
    pub args: &'a [String],
    /// Environment variables to set for the command.
    pub env: &'a BTreeMap<String, String>,
    /// Capabilities currently active in the session.
    pub context: &'a ServiceContext,
}

/// Runs CLI commands on behalf of a test session.
pub trait CommandExecutor: Send + Sync {
    /// Runs the invocation to completion and returns its captured output.
    ///
    /// A non-zero exit code is a successful execution; only failure to run
    /// the command at all is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started.
    fn execute(&self, invocation: &Invocation<'_>) -> Result<CommandOutput, PortError>;
}
