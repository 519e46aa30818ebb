//! Mocked adapter for the `ProfileLoader` port.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::PortError;
use crate::ports::profile::{Profile, ProfileLoader};

/// Serves an in-memory test profile for the default source.
///
/// Explicit non-default sources are delegated to the wrapped loader.
pub struct TestProfileLoader {
    profile: Profile,
    inner: Arc<dyn ProfileLoader>,
}

impl TestProfileLoader {
    /// Creates a loader that answers default loads with `profile`.
    pub fn new(profile: Profile, inner: Arc<dyn ProfileLoader>) -> Self {
        Self { profile, inner }
    }
}

impl ProfileLoader for TestProfileLoader {
    fn default_path(&self) -> PathBuf {
        self.inner.default_path()
    }

    fn load(&self, source: Option<&Path>) -> Result<Profile, PortError> {
        match source {
            Some(path) if path != self.inner.default_path() => self.inner.load(Some(path)),
            _ => Ok(self.profile.clone()),
        }
    }
}
