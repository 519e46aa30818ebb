//! Mocked adapter for the `IdGenerator` port.

use crate::ports::id_gen::IdGenerator;

/// Deterministic identifiers: the `k`th identifier for a prefix is `prefix + k`.
///
/// Names depend only on how many were generated before, so they are the
/// same when a suite is recorded and when it is replayed.
pub struct SequentialIdGenerator;

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self, prefix: &str, ledger: &[String]) -> String {
        format!("{prefix}{}", ledger.len() + 1)
    }
}
