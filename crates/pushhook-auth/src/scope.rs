//! Scoped privilege elevation.

use pushhook_core::Identity;
use pushhook_core::ports::SecurityContext;
use tracing::debug;

/// Runs as [`Identity::SYSTEM`] until dropped, then restores the identity
/// that was current when the scope was entered.
///
/// Restoration happens in `Drop`, so it also runs while unwinding from a
/// panic.
#[must_use = "the previous identity is restored as soon as the scope is dropped"]
pub struct ElevatedScope<'a> {
    context: &'a dyn SecurityContext,
    previous: Identity,
}

impl<'a> ElevatedScope<'a> {
    pub fn enter(context: &'a dyn SecurityContext) -> Self {
        let previous = context.current();
        context.set_current(Identity::SYSTEM);
        debug!(previous = %previous, "Entered system scope");
        Self { context, previous }
    }

    /// Identity that will be restored on exit.
    pub fn previous(&self) -> &Identity {
        &self.previous
    }
}

impl Drop for ElevatedScope<'_> {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        debug!(restored = %previous, "Leaving system scope");
        self.context.set_current(previous);
    }
}

/// Run `f` as the system identity.
pub fn run_elevated<R>(context: &dyn SecurityContext, f: impl FnOnce() -> R) -> R {
    let _scope = ElevatedScope::enter(context);
    f()
}
