//! Live file probe using `std::fs`.

use std::path::Path;

use crate::error::PortError;
use crate::ports::filesystem::FileProbe;

/// Live file probe backed by real disk I/O.
pub struct LiveFileProbe;

impl FileProbe for LiveFileProbe {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
