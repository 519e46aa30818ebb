//! Mocked adapter for the `CredentialStore` port.

use crate::error::PortError;
use crate::ports::credentials::{CredentialStore, Credentials};

/// Returns fixed test credentials and discards writes.
pub struct FixedCredentialStore {
    credentials: Credentials,
}

impl FixedCredentialStore {
    /// Creates a store that always yields `credentials`.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialStore for FixedCredentialStore {
    fn read(&self) -> Result<Credentials, PortError> {
        Ok(self.credentials.clone())
    }

    fn write(&self, _credentials: &Credentials) -> Result<(), PortError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_does_not_change_what_is_read() {
        let fixed = Credentials { cert: "cert".into(), key: "key".into() };
        let store = FixedCredentialStore::new(fixed.clone());
        store.write(&Credentials { cert: "other".into(), key: "other".into() }).unwrap();
        assert_eq!(store.read().unwrap(), fixed);
    }
}
