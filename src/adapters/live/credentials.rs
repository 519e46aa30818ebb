//! Live credential store reading a combined PEM file.

use std::path::PathBuf;

use crate::error::PortError;
use crate::ports::credentials::{CredentialStore, Credentials};

const CERT_BEGIN: &str = "-----BEGIN CERTIFICATE-----";

/// Stores a certificate and its private key together in one PEM file.
pub struct PemCredentialStore {
    path: PathBuf,
}

impl PemCredentialStore {
    /// Creates a store backed by the PEM file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Extracts the first `-----BEGIN <label>-----` block whose label satisfies `want`.
fn pem_block(content: &str, want: impl Fn(&str) -> bool) -> Option<String> {
    let mut rest = content;
    while let Some(start) = rest.find("-----BEGIN ") {
        let block = &rest[start..];
        let label_end = block["-----BEGIN ".len()..].find("-----")? + "-----BEGIN ".len();
        let label = &block["-----BEGIN ".len()..label_end];
        let end_marker = format!("-----END {label}-----");
        let end = block.find(&end_marker)? + end_marker.len();
        if want(label) {
            return Some(block[..end].to_string());
        }
        rest = &block[end..];
    }
    None
}

impl CredentialStore for PemCredentialStore {
    fn read(&self) -> Result<Credentials, PortError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("failed to read {}: {e}", self.path.display()))?;
        let cert = pem_block(&content, |label| label == "CERTIFICATE")
            .ok_or_else(|| format!("{} has no {CERT_BEGIN} block", self.path.display()))?;
        let key = pem_block(&content, |label| label.ends_with("PRIVATE KEY"))
            .ok_or_else(|| format!("{} has no private key block", self.path.display()))?;
        Ok(Credentials { cert, key })
    }

    fn write(&self, credentials: &Credentials) -> Result<(), PortError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = format!("{}\n{}\n", credentials.key.trim_end(), credentials.cert.trim_end());
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
