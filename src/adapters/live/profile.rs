//! Live profile loader reading JSON profile files.

use std::path::{Path, PathBuf};

use crate::error::PortError;
use crate::ports::profile::{Profile, ProfileLoader};

/// Loads profiles from JSON files, defaulting to a fixed path.
pub struct JsonProfileLoader {
    default_path: PathBuf,
}

impl JsonProfileLoader {
    /// Creates a loader whose default source is `default_path`.
    pub fn new(default_path: impl Into<PathBuf>) -> Self {
        Self { default_path: default_path.into() }
    }
}

impl ProfileLoader for JsonProfileLoader {
    fn default_path(&self) -> PathBuf {
        self.default_path.clone()
    }

    fn load(&self, source: Option<&Path>) -> Result<Profile, PortError> {
        let path = source.unwrap_or(self.default_path.as_path());
        if !path.exists() {
            return Ok(Profile::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read profile {}: {e}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse profile {}: {e}", path.display()).into())
    }
}
