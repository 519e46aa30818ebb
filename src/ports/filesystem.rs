//! File probe port for configuration file reads and existence checks.

use std::path::Path;

use crate::error::PortError;

/// Read-side filesystem access used by the CLI under test.
///
/// Mocked sessions answer for well-known configuration files and delegate
/// everything else, so tests never depend on the developer's home directory.
pub trait FileProbe: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Removes a file. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), PortError>;
}
