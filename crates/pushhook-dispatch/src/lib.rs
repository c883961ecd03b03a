//! Repository-to-job matching for pushhook.
//!
//! A push notification names a repository; this crate finds every job that
//! is bound to push notifications and configured against that repository,
//! and fires the job's trigger.

pub mod dispatcher;
pub mod extractor;
pub mod receiver;
pub mod scanner;

pub use dispatcher::{DispatchReport, Dispatcher};
pub use extractor::{ExtractorOptions, ScmExtractor};
pub use receiver::{Receipt, WebhookError, WebhookReceiver};
pub use scanner::{Candidate, JobScanner};

#[cfg(test)]
pub(crate) mod testing;
