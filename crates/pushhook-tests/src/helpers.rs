//! Test helper types and utilities.

use pushhook_core::job::Job;
use pushhook_core::ports::{JobRegistry, PushTrigger, SecurityContext};
use pushhook_core::{Identity, PushEvent, Result};
use pushhook_registry::TriggerFactory;
use std::sync::{Arc, Mutex};

/// A push trigger firing, as seen by [`RecordingTrigger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Firing {
    pub job: String,
    pub repository_url: Option<String>,
    pub git_ref: Option<String>,
}

/// Trigger factory whose triggers record every firing in one shared log.
#[derive(Default, Clone)]
pub struct RecordingTrigger {
    log: Arc<Mutex<Vec<Firing>>>,
}

impl RecordingTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn firings(&self) -> Vec<Firing> {
        self.log.lock().unwrap().clone()
    }

    /// Names of the jobs that fired, in firing order.
    pub fn fired_jobs(&self) -> Vec<String> {
        self.firings().into_iter().map(|f| f.job).collect()
    }
}

struct JobTrigger {
    job: String,
    log: Arc<Mutex<Vec<Firing>>>,
}

impl PushTrigger for JobTrigger {
    fn on_push(&self, event: &PushEvent) {
        self.log.lock().unwrap().push(Firing {
            job: self.job.clone(),
            repository_url: event.repository_url().map(str::to_string),
            git_ref: event.git_ref().map(str::to_string),
        });
    }
}

impl TriggerFactory for RecordingTrigger {
    fn push_trigger(&self, job: &str) -> Arc<dyn PushTrigger> {
        Arc::new(JobTrigger {
            job: job.to_string(),
            log: self.log.clone(),
        })
    }
}

/// Registry wrapper that records the identity each listing ran under.
pub struct IdentityRecordingRegistry<R> {
    inner: R,
    context: Arc<dyn SecurityContext>,
    seen: Mutex<Vec<Identity>>,
}

impl<R: JobRegistry> IdentityRecordingRegistry<R> {
    pub fn new(inner: R, context: Arc<dyn SecurityContext>) -> Self {
        Self {
            inner,
            context,
            seen: Mutex::new(vec![]),
        }
    }

    pub fn seen(&self) -> Vec<Identity> {
        self.seen.lock().unwrap().clone()
    }
}

impl<R: JobRegistry> JobRegistry for IdentityRecordingRegistry<R> {
    fn all_jobs(&self) -> Result<Vec<Arc<dyn Job>>> {
        self.seen.lock().unwrap().push(self.context.current());
        self.inner.all_jobs()
    }
}
