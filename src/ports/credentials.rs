//! Credential store port for management certificates.

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// A PEM certificate and its private key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// PEM-encoded certificate.
    pub cert: String,
    /// PEM-encoded private key.
    pub key: String,
}

/// Reads and writes the credential file used to authenticate requests.
pub trait CredentialStore: Send + Sync {
    /// Reads the stored credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential file is missing or malformed.
    fn read(&self) -> Result<Credentials, PortError>;

    /// Persists credentials, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential file cannot be written.
    fn write(&self, credentials: &Credentials) -> Result<(), PortError>;
}
