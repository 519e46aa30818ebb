//! Fixture data structures.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::ports::http::CallDescriptor;

/// The calls recorded for one test, in the order they were made.
pub type Scope = Vec<CallDescriptor>;

/// A recorded suite: scope `n` belongs to the `n`th test executed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fixture {
    /// Suite name the fixture was recorded for.
    pub name: String,
    /// When recording started.
    pub recorded_at: DateTime<Utc>,
    /// Ordered per-test scopes.
    pub scopes: Vec<Scope>,
}

impl Fixture {
    /// Conventional fixture location for a suite.
    #[must_use]
    pub fn path_for(dir: &Path, suite: &str) -> PathBuf {
        dir.join(format!("{suite}.fixture.json"))
    }

    /// Reads and parses a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a complete fixture.
    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| SessionError::FixtureIo { path: path.to_path_buf(), source })?;
        serde_json::from_str(&content)
            .map_err(|source| SessionError::FixtureParse { path: path.to_path_buf(), source })
    }

    /// Writes the fixture in the same layout the recorder produces.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        let io_err = |source| SessionError::FixtureIo { path: path.to_path_buf(), source };
        let header = header_json(&self.name, &self.recorded_at)
            .map_err(|source| SessionError::FixtureParse { path: path.to_path_buf(), source })?;
        let mut out = header;
        for (i, scope) in self.scopes.iter().enumerate() {
            let json = serde_json::to_string(scope)
                .map_err(|source| SessionError::FixtureParse { path: path.to_path_buf(), source })?;
            out.push_str(scope_separator(i));
            out.push_str(&json);
        }
        out.push_str(FOOTER);
        std::fs::write(path, out).map_err(io_err)
    }
}

/// Closes the scopes array and the document.
pub(crate) const FOOTER: &str = "\n]}\n";

/// Opening of a fixture document up to and including the scopes array bracket.
pub(crate) fn header_json(
    name: &str,
    recorded_at: &DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    Ok(format!(
        "{{\"name\":{},\"recorded_at\":{},\"scopes\":[",
        serde_json::to_string(name)?,
        serde_json::to_string(recorded_at)?
    ))
}

/// Text written before the scope at `index`.
pub(crate) fn scope_separator(index: usize) -> &'static str {
    if index == 0 {
        "\n"
    } else {
        ",\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::http::BodyMatcher;
    use std::collections::BTreeMap;

    fn call(method: &str, path: &str) -> CallDescriptor {
        CallDescriptor {
            scope: "https://api.example.com:443".into(),
            method: method.into(),
            path: path.into(),
            body: Some(BodyMatcher::Any),
            status: 200,
            headers: BTreeMap::new(),
            response: "{}".into(),
        }
    }

    #[test]
    fn save_then_load_keeps_scope_order() {
        let dir = std::env::temp_dir().join("climock_fixture_format_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = Fixture::path_for(&dir, "suite");

        let fixture = Fixture {
            name: "suite".into(),
            recorded_at: Utc::now(),
            scopes: vec![vec![call("GET", "/a")], vec![], vec![call("POST", "/b"), call("GET", "/c")]],
        };
        fixture.save(&path).unwrap();
        let loaded = Fixture::load(&path).unwrap();

        assert_eq!(loaded, fixture);
        assert!(path.ends_with("suite.fixture.json"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn truncated_fixture_is_a_parse_error() {
        let dir = std::env::temp_dir().join("climock_fixture_truncated_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.fixture.json");
        std::fs::write(&path, "{\"name\":\"x\",\"recorded_at\":\"2024-01-01T00:00:00Z\",\"scopes\":[\n[]")
            .unwrap();

        let err = Fixture::load(&path).unwrap_err();
        assert!(matches!(err, SessionError::FixtureParse { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_fixture_is_an_io_error() {
        let err = Fixture::load(Path::new("/nonexistent/climock/none.fixture.json")).unwrap_err();
        assert!(matches!(err, SessionError::FixtureIo { .. }));
    }
}
