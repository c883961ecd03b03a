//! Identity handling for pushhook.
//!
//! Webhook deliveries are unauthenticated, yet matching them needs read
//! access to every job. This crate provides the places an identity can live
//! for the duration of one call, and [`ElevatedScope`] which switches to the
//! system identity and switches back when dropped.

pub mod context;
pub mod scope;

pub use context::{RequestSecurityContext, ThreadLocalSecurityContext};
pub use scope::{ElevatedScope, run_elevated};
