//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the matching engine and the
//! host it runs inside.

use crate::event::PushEvent;
use crate::identity::Identity;
use crate::job::Job;
use crate::Result;
use std::sync::Arc;

/// Read access to every job the host knows about.
///
/// Implementations must be safe for concurrent reads.
pub trait JobRegistry: Send + Sync {
    /// List all jobs, including those nested in folders.
    fn all_jobs(&self) -> Result<Vec<Arc<dyn Job>>>;
}

/// Handler bound to a job that reacts to matching push events.
///
/// Fire-and-forget: implementations must not block on the build they
/// request.
pub trait PushTrigger: Send + Sync {
    fn on_push(&self, event: &PushEvent);
}

/// Holder of the identity the current call runs as.
pub trait SecurityContext: Send + Sync {
    /// Get the current identity.
    fn current(&self) -> Identity;

    /// Replace the current identity.
    fn set_current(&self, identity: Identity);
}
