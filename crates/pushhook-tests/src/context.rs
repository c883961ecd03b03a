//! Test context wiring a catalog to a live receiver and build queue.

use pushhook_dispatch::{Dispatcher, WebhookReceiver};
use pushhook_registry::{
    AdapterRegistry, BuildQueue, BuildRequest, Catalog, InMemoryJobRegistry, JobSpec,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Receiver over a catalog, with the queue its triggers feed.
pub struct TestContext {
    pub receiver: WebhookReceiver,
    pub registry: Arc<InMemoryJobRegistry>,
    pub requests: UnboundedReceiver<BuildRequest>,
}

impl TestContext {
    pub fn new(catalog: &Catalog) -> anyhow::Result<Self> {
        crate::init_test_logging();

        let (queue, requests) = BuildQueue::new();
        let registry = Arc::new(InMemoryJobRegistry::from_catalog(
            catalog,
            &AdapterRegistry::with_builtins(),
            &queue,
        )?);
        let receiver = WebhookReceiver::new(Dispatcher::new(registry.clone()));

        Ok(Self {
            receiver,
            registry,
            requests,
        })
    }

    pub fn with_jobs(jobs: Vec<JobSpec>) -> anyhow::Result<Self> {
        Self::new(&crate::fixtures::catalog(jobs))
    }

    /// Every build request queued so far.
    pub fn drain(&mut self) -> Vec<BuildRequest> {
        let mut queued = Vec::new();
        while let Ok(request) = self.requests.try_recv() {
            queued.push(request);
        }
        queued
    }

    /// Job names of every build request queued so far.
    pub fn drain_jobs(&mut self) -> Vec<String> {
        self.drain().into_iter().map(|request| request.job).collect()
    }
}
