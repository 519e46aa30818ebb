//! Service context bundling the capabilities the CLI under test sees.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{JsonProfileLoader, LiveFileProbe, PemCredentialStore, ReqwestTransport};
use crate::config::{CREDENTIALS_FILE, PROFILE_FILE};
use crate::ports::credentials::CredentialStore;
use crate::ports::filesystem::FileProbe;
use crate::ports::http::HttpTransport;
use crate::ports::profile::{Profile, ProfileLoader};

/// Bundles the capabilities handed to a command executor.
///
/// A test session builds one per command from whatever is currently active:
/// stand-ins while a suite is set up, originals otherwise.
#[derive(Clone)]
pub struct ServiceContext {
    /// Credential file access.
    pub credentials: Arc<dyn CredentialStore>,
    /// Configuration file reads and existence checks.
    pub files: Arc<dyn FileProbe>,
    /// Subscription profile loading.
    pub profiles: Arc<dyn ProfileLoader>,
    /// HTTP transport the CLI must send its requests through.
    pub http: Arc<dyn HttpTransport>,
    /// The current profile, set during suite setup.
    pub profile: Option<Profile>,
}

impl ServiceContext {
    /// Creates a context with live adapters rooted at the CLI home directory.
    pub fn live(home: impl AsRef<Path>) -> Self {
        let home = home.as_ref();
        Self {
            credentials: Arc::new(PemCredentialStore::new(home.join(CREDENTIALS_FILE))),
            files: Arc::new(LiveFileProbe),
            profiles: Arc::new(JsonProfileLoader::new(home.join(PROFILE_FILE))),
            http: Arc::new(ReqwestTransport::new()),
            profile: None,
        }
    }
}
