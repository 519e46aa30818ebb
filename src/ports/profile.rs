//! Profile port for the subscription profile the CLI operates against.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PortError;

/// One subscription entry in a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Cloud environment name.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Whether this is the subscription commands use when none is given.
    #[serde(default)]
    pub is_default: bool,
}

fn default_environment() -> String {
    "AzureCloud".to_string()
}

/// The set of subscriptions known to the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Known subscriptions.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl Profile {
    /// Returns the default subscription, or the first one if none is marked.
    #[must_use]
    pub fn default_subscription(&self) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.is_default).or_else(|| self.subscriptions.first())
    }
}

/// Loads profiles from a source.
pub trait ProfileLoader: Send + Sync {
    /// The path used when `load` is called without a source.
    fn default_path(&self) -> PathBuf;

    /// Loads a profile from `source`, or from [`default_path`](Self::default_path)
    /// when `source` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be read or parsed.
    fn load(&self, source: Option<&Path>) -> Result<Profile, PortError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(id: &str, is_default: bool) -> Subscription {
        Subscription {
            id: id.into(),
            name: format!("{id}-name"),
            environment: default_environment(),
            is_default,
        }
    }

    #[test]
    fn default_subscription_prefers_marked_entry() {
        let profile = Profile { subscriptions: vec![sub("a", false), sub("b", true)] };
        assert_eq!(profile.default_subscription().unwrap().id, "b");
    }

    #[test]
    fn default_subscription_falls_back_to_first() {
        let profile = Profile { subscriptions: vec![sub("a", false), sub("b", false)] };
        assert_eq!(profile.default_subscription().unwrap().id, "a");
        assert!(Profile::default().default_subscription().is_none());
    }

    #[test]
    fn environment_defaults_when_missing() {
        let profile: Profile =
            serde_json::from_str(r#"{"subscriptions":[{"id":"s","name":"n"}]}"#).unwrap();
        assert_eq!(profile.subscriptions[0].environment, "AzureCloud");
        assert!(!profile.subscriptions[0].is_default);
    }
}
