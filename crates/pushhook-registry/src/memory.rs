//! In-memory job registry.

use crate::adapters::{AdapterContext, AdapterRegistry, Folder};
use crate::catalog::Catalog;
use crate::queue::TriggerFactory;
use pushhook_core::job::Job;
use pushhook_core::ports::JobRegistry;
use pushhook_core::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Registry over job handles held in memory, in registration order.
#[derive(Default)]
pub struct InMemoryJobRegistry {
    jobs: RwLock<Vec<Arc<dyn Job>>>,
}

impl InMemoryJobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every job a catalog declares.
    pub fn from_catalog(
        catalog: &Catalog,
        adapters: &AdapterRegistry,
        triggers: &dyn TriggerFactory,
    ) -> Result<Self> {
        let folders: HashMap<String, Arc<Folder>> = catalog
            .folders
            .iter()
            .map(|spec| (spec.name.clone(), Arc::new(Folder::from_spec(spec))))
            .collect();
        let ctx = AdapterContext {
            folders: &folders,
            triggers,
        };

        let registry = Self::new();
        for spec in &catalog.jobs {
            registry.insert(adapters.build(spec, &ctx)?)?;
        }

        info!(
            jobs = registry.len(),
            folders = folders.len(),
            "Loaded job catalog"
        );
        Ok(registry)
    }

    /// Add a job. Names must be unique.
    pub fn insert(&self, job: Arc<dyn Job>) -> Result<()> {
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        if jobs.iter().any(|j| j.full_name() == job.full_name()) {
            return Err(Error::DuplicateJob(job.full_name().to_string()));
        }
        jobs.push(job);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Job>> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|job| job.full_name() == name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl JobRegistry for InMemoryJobRegistry {
    fn all_jobs(&self) -> Result<Vec<Arc<dyn Job>>> {
        Ok(self
            .jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
