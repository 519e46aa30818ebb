//! Identifier generator port for naming resources created by tests.

/// Produces identifiers that are unique within a ledger.
///
/// The ledger holds every identifier already handed out for a prefix in the
/// current test. Mocked sessions substitute a predictable sequence so that
/// names match between recording and playback.
pub trait IdGenerator: Send + Sync {
    /// Returns the next identifier for `prefix` that is not in `ledger`.
    ///
    /// Implementations do not modify the ledger; the caller records the
    /// returned value.
    fn next_id(&self, prefix: &str, ledger: &[String]) -> String;
}
