//! Turns raw recorder output into a replayable scope.

use crate::ports::http::{BodyMatcher, CallDescriptor, RecordedLine};

/// Methods whose request bodies routinely carry timestamps or nonces.
pub const VOLATILE_BODY_METHODS: [&str; 5] = ["POST", "PUT", "PATCH", "MERGE", "DELETE"];

/// Relaxes the body matcher of a mutating call to accept any body.
///
/// Returns `true` if the descriptor changed.
pub fn relax_body(descriptor: &mut CallDescriptor) -> bool {
    let volatile =
        VOLATILE_BODY_METHODS.iter().any(|m| m.eq_ignore_ascii_case(&descriptor.method));
    if !volatile || descriptor.body == Some(BodyMatcher::Any) {
        return false;
    }
    descriptor.body = Some(BodyMatcher::Any);
    true
}

/// Keeps the captured exchanges from recorder output and relaxes their bodies.
#[must_use]
pub fn scope_from_recording(lines: Vec<RecordedLine>) -> Vec<CallDescriptor> {
    lines
        .into_iter()
        .filter_map(|line| match line {
            RecordedLine::Exchange(descriptor) => Some(descriptor),
            RecordedLine::Note(_) => None,
        })
        .map(|mut descriptor| {
            relax_body(&mut descriptor);
            descriptor
        })
        .collect()
}
