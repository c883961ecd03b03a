//! Integration test infrastructure for pushhook.
//!
//! Wires a catalog-backed registry, the webhook receiver and the build
//! queue together so tests can drive whole deliveries.
//!
//! # Usage
//!
//! ```ignore
//! use pushhook_tests::{JobFixture, PayloadFixture, TestContext};
//!
//! #[test]
//! fn test_something() {
//!     let mut ctx = TestContext::with_jobs(vec![JobFixture::freestyle("app", URL)]).unwrap();
//!     ctx.receiver.receive(Some("push"), Some(&PayloadFixture::push(URL))).unwrap();
//!     let queued = ctx.drain();
//! }
//! ```

pub mod context;
pub mod fixtures;
pub mod helpers;

pub use context::TestContext;
pub use fixtures::*;
pub use helpers::*;

/// Initialize test logging (call once per test binary).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,pushhook_dispatch=debug")),
        )
        .with_test_writer()
        .try_init();
}
