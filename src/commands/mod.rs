//! Command dispatch and handlers.

pub mod fixture;

use crate::cli::{Command, FixtureCommand};

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Fixture(FixtureCommand::Scopes { path }) => fixture::scopes(path),
        Command::Fixture(FixtureCommand::Show { path, index }) => fixture::show(path, *index),
        Command::Fixture(FixtureCommand::Normalize { path, dry_run }) => {
            fixture::normalize(path, *dry_run)
        }
    }
}
