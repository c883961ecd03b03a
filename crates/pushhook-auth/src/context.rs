//! Security context implementations.

use pushhook_core::Identity;
use pushhook_core::ports::SecurityContext;
use std::cell::RefCell;
use std::sync::{Mutex, PoisonError};

thread_local! {
    static CURRENT: RefCell<Identity> = const { RefCell::new(Identity::Anonymous) };
}

/// Identity stored per OS thread.
///
/// Each request thread sees only its own identity, so an elevation on one
/// thread never leaks into another. Not suitable across `.await` points, where
/// a task may resume on a different worker thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadLocalSecurityContext;

impl ThreadLocalSecurityContext {
    pub fn new() -> Self {
        Self
    }
}

impl SecurityContext for ThreadLocalSecurityContext {
    fn current(&self) -> Identity {
        CURRENT.with(|current| current.borrow().clone())
    }

    fn set_current(&self, identity: Identity) {
        CURRENT.with(|current| *current.borrow_mut() = identity);
    }
}

/// Identity owned by a single request and passed down explicitly.
#[derive(Debug, Default)]
pub struct RequestSecurityContext {
    identity: Mutex<Identity>,
}

impl RequestSecurityContext {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity: Mutex::new(identity),
        }
    }

    /// Context for an unauthenticated webhook delivery.
    pub fn anonymous() -> Self {
        Self::new(Identity::Anonymous)
    }
}

impl SecurityContext for RequestSecurityContext {
    fn current(&self) -> Identity {
        self.identity
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_current(&self, identity: Identity) {
        *self
            .identity
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = identity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_local_defaults_to_anonymous() {
        let ctx = ThreadLocalSecurityContext::new();
        std::thread::spawn(move || assert_eq!(ctx.current(), Identity::Anonymous))
            .join()
            .unwrap();
    }

    #[test]
    fn test_thread_local_is_per_thread() {
        let ctx = ThreadLocalSecurityContext::new();
        ctx.set_current(Identity::user("alice"));

        std::thread::spawn(move || {
            assert_eq!(ctx.current(), Identity::Anonymous);
            ctx.set_current(Identity::SYSTEM);
        })
        .join()
        .unwrap();

        assert_eq!(ctx.current(), Identity::user("alice"));
        ctx.set_current(Identity::Anonymous);
    }

    #[test]
    fn test_request_context_set_and_get() {
        let ctx = RequestSecurityContext::anonymous();
        assert_eq!(ctx.current(), Identity::Anonymous);
        ctx.set_current(Identity::user("bob"));
        assert_eq!(ctx.current().name(), "bob");
    }
}
