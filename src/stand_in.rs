//! Install/restore slots for capabilities that tests replace.

use std::sync::Arc;

use crate::error::SessionError;

/// Holds an original capability and, optionally, a stand-in for it.
///
/// [`current`](Self::current) yields the stand-in while one is installed and
/// the original otherwise.
pub struct StandIn<T: ?Sized> {
    capability: &'static str,
    original: Arc<T>,
    stand_in: Option<Arc<T>>,
}

impl<T: ?Sized> StandIn<T> {
    /// Creates a slot holding only the original.
    pub fn new(capability: &'static str, original: Arc<T>) -> Self {
        Self { capability, original, stand_in: None }
    }

    /// Installs a stand-in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StandInAlreadyInstalled`] if one is already in place.
    pub fn install(&mut self, stand_in: Arc<T>) -> Result<(), SessionError> {
        if self.stand_in.is_some() {
            return Err(SessionError::StandInAlreadyInstalled { capability: self.capability });
        }
        self.stand_in = Some(stand_in);
        Ok(())
    }

    /// Removes the stand-in, if any. Returns `true` if one was removed.
    pub fn restore(&mut self) -> bool {
        self.stand_in.take().is_some()
    }

    /// Returns `true` while a stand-in is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.stand_in.is_some()
    }

    /// The capability callers should use right now.
    #[must_use]
    pub fn current(&self) -> Arc<T> {
        Arc::clone(self.stand_in.as_ref().unwrap_or(&self.original))
    }

    /// The original capability, regardless of any stand-in.
    #[must_use]
    pub fn original(&self) -> Arc<T> {
        Arc::clone(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Real;
    impl Greeter for Real {
        fn greet(&self) -> &'static str {
            "real"
        }
    }

    struct Fake;
    impl Greeter for Fake {
        fn greet(&self) -> &'static str {
            "fake"
        }
    }

    #[test]
    fn install_then_restore_routes_back_to_original() {
        let mut slot: StandIn<dyn Greeter> = StandIn::new("greeter", Arc::new(Real));
        assert_eq!(slot.current().greet(), "real");

        slot.install(Arc::new(Fake)).unwrap();
        assert!(slot.is_installed());
        assert_eq!(slot.current().greet(), "fake");
        assert_eq!(slot.original().greet(), "real");

        assert!(slot.restore());
        assert_eq!(slot.current().greet(), "real");
    }

    #[test]
    fn restore_without_stand_in_is_a_no_op() {
        let mut slot: StandIn<dyn Greeter> = StandIn::new("greeter", Arc::new(Real));
        assert!(!slot.restore());
        assert!(!slot.restore());
    }

    #[test]
    fn double_install_fails_loudly() {
        let mut slot: StandIn<dyn Greeter> = StandIn::new("greeter", Arc::new(Real));
        slot.install(Arc::new(Fake)).unwrap();
        let err = slot.install(Arc::new(Fake)).unwrap_err();
        assert!(err.to_string().contains("greeter"));
    }
}
