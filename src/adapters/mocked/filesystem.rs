//! Mocked adapter for the `FileProbe` port.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::PortError;
use crate::ports::filesystem::FileProbe;

/// Answers for well-known configuration files and delegates other paths.
///
/// Files are matched by file name, wherever they live.
pub struct StubFileProbe {
    known: BTreeMap<String, String>,
    inner: Arc<dyn FileProbe>,
}

impl StubFileProbe {
    /// Creates a probe serving `known` (file name to contents) over `inner`.
    pub fn new(known: BTreeMap<String, String>, inner: Arc<dyn FileProbe>) -> Self {
        Self { known, inner }
    }

    fn known_contents(&self, path: &Path) -> Option<&String> {
        let name = path.file_name()?.to_str()?;
        self.known.get(name)
    }
}

impl FileProbe for StubFileProbe {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        match self.known_contents(path) {
            Some(contents) => Ok(contents.clone()),
            None => self.inner.read_to_string(path),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.known_contents(path).is_some() || self.inner.exists(path)
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        self.inner.remove_file(path)
    }
}
