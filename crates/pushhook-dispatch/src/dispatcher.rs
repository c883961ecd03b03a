//! Push dispatch orchestration.

use crate::extractor::ScmExtractor;
use crate::scanner::{Candidate, JobScanner};
use pushhook_core::ids::DeliveryId;
use pushhook_core::ports::JobRegistry;
use pushhook_core::{PushEvent, RemoteUrl, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Outcome of a single dispatch pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub delivery_id: DeliveryId,
    pub target_url: RemoteUrl,
    /// Jobs with a push binding that were inspected.
    pub candidates: usize,
    /// Full names of the jobs whose trigger fired, in registry order.
    pub triggered: Vec<String>,
}

impl DispatchReport {
    pub fn was_triggered(&self, job: &str) -> bool {
        self.triggered.iter().any(|name| name == job)
    }
}

/// Matches push events against the jobs in a registry and fires the
/// triggers of the jobs configured against the pushed repository.
pub struct Dispatcher {
    registry: Arc<dyn JobRegistry>,
    scanner: JobScanner,
    extractor: ScmExtractor,
}

impl Dispatcher {
    pub fn new(registry: Arc<dyn JobRegistry>) -> Self {
        Self::with_extractor(registry, ScmExtractor::new())
    }

    pub fn with_extractor(registry: Arc<dyn JobRegistry>, extractor: ScmExtractor) -> Self {
        Self {
            registry,
            scanner: JobScanner::new(),
            extractor,
        }
    }

    pub fn extractor(&self) -> &ScmExtractor {
        &self.extractor
    }

    /// Fire the trigger of every bound job configured against the event's
    /// repository.
    ///
    /// Returns `Ok(None)` when the event carries no usable repository URL;
    /// nothing is scanned in that case.
    #[instrument(skip(self, event), fields(delivery = %event.delivery_id()))]
    pub fn dispatch(&self, event: &PushEvent) -> Result<Option<DispatchReport>> {
        let Some(target) = event.target_url() else {
            warn!("Push event has no repository URL, skipping dispatch");
            return Ok(None);
        };

        let candidates = self.scanner.candidates(self.registry.as_ref())?;
        let scanned = candidates.len();
        let mut seen = HashSet::new();
        let mut triggered = Vec::new();

        for candidate in candidates {
            let name = candidate.job.full_name().to_string();
            if seen.contains(&name) || !self.matches(&candidate, &target) {
                continue;
            }

            info!(job = %name, url = %target, "Triggering job for push");
            candidate.trigger.on_push(event);
            seen.insert(name.clone());
            triggered.push(name);
        }

        debug!(candidates = scanned, triggered = triggered.len(), "Dispatch complete");

        Ok(Some(DispatchReport {
            delivery_id: event.delivery_id(),
            target_url: target,
            candidates: scanned,
            triggered,
        }))
    }

    fn matches(&self, candidate: &Candidate, target: &RemoteUrl) -> bool {
        self.extractor
            .remote_urls(candidate.job.as_ref())
            .contains(target)
    }
}
