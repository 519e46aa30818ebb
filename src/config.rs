//! Session configuration read from the environment.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::ports::credentials::Credentials;
use crate::ports::profile::{Profile, Subscription};

/// Set to run against the live backend instead of fixtures.
pub const SKIP_MOCKING_VAR: &str = "NOCK_OFF";
/// Set to record fixtures while running against the live backend.
pub const RECORD_VAR: &str = "AZURE_NOCK_RECORD";
/// Subscription the tests run against.
pub const SUBSCRIPTION_VAR: &str = "AZURE_SUBSCRIPTION_ID";
/// PEM certificate handed out by the mocked credential store.
pub const CERTIFICATE_VAR: &str = "AZURE_CERTIFICATE";
/// PEM private key handed out by the mocked credential store.
pub const CERTIFICATE_KEY_VAR: &str = "AZURE_CERTIFICATE_KEY";
/// Directory fixture files are written to and read from.
pub const FIXTURES_DIR_VAR: &str = "CLIMOCK_FIXTURES_DIR";
/// Configuration directory of the CLI under test.
pub const HOME_VAR: &str = "CLIMOCK_HOME";
/// Entry point prepended to every executed command.
pub const ENTRY_VAR: &str = "CLIMOCK_ENTRY";
/// Set in the child environment of mocked sessions to relax TLS verification.
pub const STRICT_SSL_VAR: &str = "AZURE_ENABLE_STRICT_SSL";

/// Name of the profile file inside the CLI home directory.
pub const PROFILE_FILE: &str = "profile.json";
/// Name of the credential file inside the CLI home directory.
pub const CREDENTIALS_FILE: &str = "credentials.pem";

const DEFAULT_SUBSCRIPTION: &str = "00000000-0000-0000-0000-000000000000";
const DEFAULT_FIXTURES_DIR: &str = "tests/recordings";
const DEFAULT_HOME: &str = ".climock";
const DEFAULT_ENTRY: &str = "cli";

/// Everything a [`TestSession`](crate::session::TestSession) needs from its
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Skip mocking and talk to the live backend.
    pub live: bool,
    /// Record fixtures instead of replaying them.
    pub record: bool,
    /// Subscription identifier used for the test profile and `-s` flag.
    pub subscription_id: String,
    /// Credentials returned by the mocked credential store.
    pub credentials: Credentials,
    /// Directory holding fixture files.
    pub fixtures_dir: PathBuf,
    /// Configuration directory of the CLI under test.
    pub home: PathBuf,
    /// Leading arguments every command must start with.
    pub entry: Vec<String>,
    /// Configuration file names answered by the mocked file probe, with contents.
    pub known_files: BTreeMap<String, String>,
}

impl SessionConfig {
    /// Reads the configuration from the process environment, loading `.env`
    /// first if present.
    #[must_use]
    pub fn from_env() -> Self {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| {
            lookup(key).is_some_and(|v| !matches!(v.trim(), "" | "0" | "false"))
        };
        let value = |key: &str, default: &str| {
            lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
        };

        let entry = value(ENTRY_VAR, DEFAULT_ENTRY).split_whitespace().map(str::to_string).collect();

        let mut config = Self {
            live: flag(SKIP_MOCKING_VAR),
            record: flag(RECORD_VAR),
            subscription_id: value(SUBSCRIPTION_VAR, DEFAULT_SUBSCRIPTION),
            credentials: Credentials {
                cert: value(CERTIFICATE_VAR, "test-certificate"),
                key: value(CERTIFICATE_KEY_VAR, "test-certificate-key"),
            },
            fixtures_dir: PathBuf::from(value(FIXTURES_DIR_VAR, DEFAULT_FIXTURES_DIR)),
            home: PathBuf::from(value(HOME_VAR, DEFAULT_HOME)),
            entry,
            known_files: BTreeMap::new(),
        };
        config.known_files.insert("config.json".to_string(), "{}".to_string());
        config.known_files.insert(PROFILE_FILE.to_string(), config.test_profile_json());
        config
    }

    /// The profile stand-in served while the session is set up.
    #[must_use]
    pub fn test_profile(&self) -> Profile {
        Profile {
            subscriptions: vec![Subscription {
                id: self.subscription_id.clone(),
                name: "climock-test-subscription".to_string(),
                environment: "AzureCloud".to_string(),
                is_default: true,
            }],
        }
    }

    fn test_profile_json(&self) -> String {
        // Serializing plain strings and bools cannot fail.
        serde_json::to_string(&self.test_profile()).unwrap_or_default()
    }

    /// Path of the CLI's profile file.
    #[must_use]
    pub fn profile_path(&self) -> PathBuf {
        self.home.join(PROFILE_FILE)
    }

    /// Path of the CLI's credential file.
    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        self.home.join(CREDENTIALS_FILE)
    }

    /// Local cache files removed before a suite runs.
    #[must_use]
    pub fn cache_artifacts(&self) -> Vec<PathBuf> {
        vec![
            self.home.join(format!("{}.pem", self.subscription_id)),
            self.home.join(format!("{}.cache.json", self.subscription_id)),
            self.profile_path(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vars: &[(&str, &str)]) -> SessionConfig {
        let vars: BTreeMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        SessionConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_mock_and_replay() {
        let config = config(&[]);
        assert!(!config.live);
        assert!(!config.record);
        assert_eq!(config.entry, vec!["cli".to_string()]);
        assert_eq!(config.fixtures_dir, PathBuf::from("tests/recordings"));
        assert!(config.known_files.contains_key("config.json"));
    }

    #[test]
    fn toggles_treat_false_and_zero_as_unset() {
        assert!(config(&[(SKIP_MOCKING_VAR, "1")]).live);
        assert!(!config(&[(SKIP_MOCKING_VAR, "0")]).live);
        assert!(!config(&[(RECORD_VAR, "false")]).record);
        assert!(config(&[(RECORD_VAR, "true")]).record);
    }

    #[test]
    fn subscription_flows_into_profile_and_artifacts() {
        let config = config(&[(SUBSCRIPTION_VAR, "sub1"), (HOME_VAR, "/tmp/home")]);
        assert_eq!(config.test_profile().default_subscription().unwrap().id, "sub1");
        assert_eq!(
            config.cache_artifacts(),
            vec![
                PathBuf::from("/tmp/home/sub1.pem"),
                PathBuf::from("/tmp/home/sub1.cache.json"),
                PathBuf::from("/tmp/home/profile.json"),
            ]
        );
        assert!(config.known_files[PROFILE_FILE].contains("sub1"));
    }

    #[test]
    fn entry_is_split_on_whitespace() {
        let config = config(&[(ENTRY_VAR, "node  cli.js")]);
        assert_eq!(config.entry, vec!["node".to_string(), "cli.js".to_string()]);
    }
}
