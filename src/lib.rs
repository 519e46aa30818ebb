//! Record/replay test sessions for command-line tools that talk HTTP.
//!
//! A [`TestSession`] drives one test suite. In mocked mode it stands in for
//! credential, configuration-file and profile access, and either records the
//! HTTP exchanges each test makes into a fixture file or replays them from
//! it. In live mode requests reach the real backend.

pub mod adapters;
pub mod cli;
pub mod command_line;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fixture;
pub mod intercept;
pub mod ports;
pub mod session;
pub mod stand_in;

pub use config::SessionConfig;
pub use context::ServiceContext;
pub use error::SessionError;
pub use session::{Mode, TestSession};

use clap::Parser;

/// Run the `climock` CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["climock", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_reports_missing_fixture() {
        let result = run(["climock", "fixture", "scopes", "/nonexistent/climock.fixture.json"]);
        assert!(result.unwrap_err().contains("fixture I/O failed"));
    }
}
