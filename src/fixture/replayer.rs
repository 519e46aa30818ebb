//! Serves recorded scopes by test position.

use std::path::{Path, PathBuf};

use super::format::Fixture;
use crate::error::SessionError;
use crate::ports::http::CallDescriptor;

/// A loaded fixture indexed by test position.
#[derive(Debug)]
pub struct FixtureReplayer {
    path: PathBuf,
    fixture: Fixture,
}

impl FixtureReplayer {
    /// Loads the fixture at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let fixture = Fixture::load(path)?;
        Ok(Self::new(path, fixture))
    }

    /// Wraps an already loaded fixture.
    #[must_use]
    pub fn new(path: &Path, fixture: Fixture) -> Self {
        Self { path: path.to_path_buf(), fixture }
    }

    /// Returns the scope recorded for the test at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::FixtureExhausted`] when the fixture holds fewer
    /// scopes than tests that have run, which means it is stale.
    pub fn scope(&self, index: usize) -> Result<&[CallDescriptor], SessionError> {
        self.fixture.scopes.get(index).map(Vec::as_slice).ok_or_else(|| {
            SessionError::FixtureExhausted {
                path: self.path.clone(),
                index,
                scopes: self.fixture.scopes.len(),
            }
        })
    }

    /// Number of recorded scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fixture.scopes.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixture.scopes.is_empty()
    }
}
