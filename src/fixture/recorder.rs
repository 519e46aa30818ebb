//! Writes a fixture file incrementally while a suite records.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;

use super::format::{header_json, scope_separator, FOOTER};
use crate::error::SessionError;
use crate::ports::http::CallDescriptor;

/// Appends one scope per test to an open fixture file.
///
/// The file is only valid JSON after [`finish`](Self::finish); a suite that
/// aborts mid-way leaves a truncated fixture that fails to load.
#[derive(Debug)]
pub struct FixtureRecorder {
    path: PathBuf,
    scopes_written: usize,
}

impl FixtureRecorder {
    /// Creates or truncates the fixture file and writes its header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be created.
    pub fn begin(path: impl Into<PathBuf>, name: &str) -> Result<Self, SessionError> {
        let path = path.into();
        let io_err = |source| SessionError::FixtureIo { path: path.clone(), source };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let header = header_json(name, &Utc::now())
            .map_err(|source| SessionError::FixtureParse { path: path.clone(), source })?;
        std::fs::write(&path, header).map_err(io_err)?;
        Ok(Self { path, scopes_written: 0 })
    }

    /// Appends the scope for the test that just finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the scope cannot be serialized or appended.
    pub fn append_scope(&mut self, scope: &[CallDescriptor]) -> Result<(), SessionError> {
        let json = serde_json::to_string(scope)
            .map_err(|source| SessionError::FixtureParse { path: self.path.clone(), source })?;
        let separator = scope_separator(self.scopes_written);
        self.append(&format!("{separator}{json}"))?;
        self.scopes_written += 1;
        Ok(())
    }

    /// Closes the scopes array, leaving a complete fixture on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be appended to.
    pub fn finish(self) -> Result<PathBuf, SessionError> {
        self.append(FOOTER)?;
        Ok(self.path)
    }

    /// Number of scopes appended so far.
    #[must_use]
    pub fn scopes_written(&self) -> usize {
        self.scopes_written
    }

    fn append(&self, text: &str) -> Result<(), SessionError> {
        let io_err = |source| SessionError::FixtureIo { path: self.path.clone(), source };
        let mut file = OpenOptions::new().append(true).open(&self.path).map_err(io_err)?;
        file.write_all(text.as_bytes()).map_err(io_err)
    }
}
