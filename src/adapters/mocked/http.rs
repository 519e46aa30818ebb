//! Registered call descriptors served while interception is active.

use crate::error::PortError;
use crate::ports::http::{CallDescriptor, HttpRequest, HttpResponse};

/// Pending descriptors registered for the current test.
///
/// Each descriptor answers one request. Requests to a scope that has no
/// registrations at all are left to the caller to pass through.
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    pending: Vec<CallDescriptor>,
}

impl ScopeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor to the end of the pending list.
    pub fn register(&mut self, descriptor: CallDescriptor) {
        self.pending.push(descriptor);
    }

    /// Consumes the first pending descriptor that answers `request`.
    ///
    /// Returns `Ok(None)` when no descriptor is registered for the request's
    /// scope.
    ///
    /// # Errors
    ///
    /// Returns an error when the scope has registrations but none match, or
    /// when the request URL is not absolute.
    pub fn take_match(&mut self, request: &HttpRequest) -> Result<Option<HttpResponse>, PortError> {
        let (scope, path) = request.scope_and_path()?;
        if let Some(pos) = self.pending.iter().position(|d| d.matches(&scope, &path, request)) {
            let descriptor = self.pending.remove(pos);
            return Ok(Some(descriptor.to_response()));
        }
        if self.pending.iter().any(|d| d.scope == scope) {
            return Err(format!(
                "no recorded call matches {} {scope}{path} ({} pending for this scope)",
                request.method,
                self.pending.iter().filter(|d| d.scope == scope).count()
            )
            .into());
        }
        Ok(None)
    }

    /// Number of registrations not yet consumed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drops all pending registrations, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }
}
