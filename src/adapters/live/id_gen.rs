//! Live adapter for the `IdGenerator` port.

use rand::Rng;

use crate::ports::IdGenerator;

/// Exclusive upper bound of the random suffix.
const SUFFIX_RANGE: u32 = 10_000;

/// Live identifier generator that draws random numeric suffixes.
///
/// Collisions with the ledger are resolved by drawing again.
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    /// Creates a new random identifier generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self, prefix: &str, ledger: &[String]) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = format!("{prefix}{}", rng.gen_range(0..SUFFIX_RANGE));
            if !ledger.contains(&candidate) {
                return candidate;
            }
        }
    }
}
