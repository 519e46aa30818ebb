//! Error type for test session operations.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by port implementations.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by [`TestSession`](crate::session::TestSession) and the
/// fixture machinery it drives.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `execute` was called without any command tokens.
    #[error("execute requires a command")]
    EmptyCommand,

    /// A `%s` placeholder had no template argument left to consume.
    #[error("command `{command}` has more %s placeholders than template arguments ({supplied})")]
    MissingTemplateArgument {
        /// The command as given.
        command: String,
        /// Number of template arguments supplied.
        supplied: usize,
    },

    /// Template arguments were supplied but never substituted.
    #[error("{unused} template argument(s) were not consumed by the command")]
    UnusedTemplateArguments {
        /// Number of leftover arguments.
        unused: usize,
    },

    /// Playback asked for a scope past the end of the fixture file.
    #[error(
        "fixture {path} is exhausted: test #{index} has no recorded scope ({scopes} recorded); \
         re-record the suite"
    )]
    FixtureExhausted {
        /// Fixture file path.
        path: PathBuf,
        /// Zero-based test index that was requested.
        index: usize,
        /// Number of scopes present in the fixture.
        scopes: usize,
    },

    /// A fixture file could not be read or written.
    #[error("fixture I/O failed for {path}: {source}")]
    FixtureIo {
        /// Fixture file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A fixture file exists but is not valid.
    #[error("failed to parse fixture {path}: {source}")]
    FixtureParse {
        /// Fixture file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Recording was requested before suite setup opened the fixture.
    #[error("suite `{suite}` has no open fixture recorder; call suite_setup first")]
    RecorderNotOpen {
        /// Suite name.
        suite: String,
    },

    /// A stand-in was installed on a slot that already carries one.
    #[error("stand-in for {capability} is already installed")]
    StandInAlreadyInstalled {
        /// Capability name (e.g. "credentials").
        capability: &'static str,
    },

    /// A collaborator behind a port failed.
    #[error("{operation} failed: {source}")]
    Collaborator {
        /// What the session was doing.
        operation: &'static str,
        /// Error reported by the port.
        #[source]
        source: PortError,
    },

    /// The command executor failed to run the command.
    #[error("command `{command}` failed to execute: {source}")]
    Command {
        /// The normalised command line.
        command: String,
        /// Error reported by the executor.
        #[source]
        source: PortError,
    },
}

impl SessionError {
    /// Wraps a port error with the operation that produced it.
    pub(crate) fn collaborator(operation: &'static str, source: PortError) -> Self {
        Self::Collaborator { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_message_names_the_fixture_and_index() {
        let err = SessionError::FixtureExhausted {
            path: PathBuf::from("tests/recordings/vm.fixture.json"),
            index: 3,
            scopes: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("vm.fixture.json"));
        assert!(msg.contains("test #3"));
        assert!(msg.contains("3 recorded"));
    }

    #[test]
    fn collaborator_keeps_source() {
        let err = SessionError::collaborator("loading profile", "disk on fire".into());
        assert_eq!(err.to_string(), "loading profile failed: disk on fire");
        assert!(std::error::Error::source(&err).is_some());
    }
}
