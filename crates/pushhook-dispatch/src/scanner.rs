//! Job registry scanning.

use pushhook_core::Result;
use pushhook_core::job::{Job, TriggerKind};
use pushhook_core::ports::{JobRegistry, PushTrigger};
use std::sync::Arc;
use tracing::trace;

/// A job bound to push notifications, with its binding.
#[derive(Clone)]
pub struct Candidate {
    pub job: Arc<dyn Job>,
    pub trigger: Arc<dyn PushTrigger>,
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("job", &self.job.full_name())
            .finish_non_exhaustive()
    }
}

/// Lists the jobs that can be triggered by a push.
#[derive(Debug, Clone, Default)]
pub struct JobScanner;

impl JobScanner {
    pub fn new() -> Self {
        Self
    }

    /// Every job in the registry that carries a push binding. Jobs without
    /// one are dropped silently.
    pub fn candidates(&self, registry: &dyn JobRegistry) -> Result<Vec<Candidate>> {
        let jobs = registry.all_jobs()?;
        let total = jobs.len();

        let candidates: Vec<Candidate> = jobs
            .into_iter()
            .filter_map(|job| {
                let trigger = push_trigger(job.as_ref())?;
                Some(Candidate { job, trigger })
            })
            .collect();

        trace!(total, candidates = candidates.len(), "Scanned job registry");
        Ok(candidates)
    }
}

/// Find the job's push binding.
///
/// Job kinds expose their triggers differently, so three lookups are tried
/// in turn: the project accessor, the typed single-trigger lookup, and the
/// named trigger map.
pub fn push_trigger(job: &dyn Job) -> Option<Arc<dyn PushTrigger>> {
    if let Some(project) = job.as_project()
        && let Some(trigger) = project.push_trigger()
    {
        return Some(trigger);
    }

    if let Some(trigger) = job
        .trigger(TriggerKind::Push)
        .and_then(|trigger| trigger.as_push().cloned())
    {
        return Some(trigger);
    }

    job.triggers()?
        .values()
        .find_map(|trigger| trigger.as_push().cloned())
}
