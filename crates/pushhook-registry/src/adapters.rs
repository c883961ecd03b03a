//! Job adapters.
//!
//! Each adapter turns a catalog [`JobSpec`] into a [`Job`] handle exposing
//! the capabilities that kind of job has on a real host, and binds its push
//! trigger the way that kind of job stores triggers.

use crate::catalog::{FolderSpec, JobSpec};
use crate::queue::TriggerFactory;
use pushhook_core::job::{
    BranchProject, ItemGroup, Job, PipelineJob, ScmProject, Trigger, TriggerKind,
};
use pushhook_core::ports::PushTrigger;
use pushhook_core::scm::{BranchSource, BuildRecord, FlowDefinition, Scm};
use pushhook_core::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Trigger map key of the push trigger.
pub const PUSH_TRIGGER_KEY: &str = "push";
/// Trigger map key of the timer trigger.
pub const TIMER_TRIGGER_KEY: &str = "timer";

/// What an adapter needs besides the job's own declaration.
pub struct AdapterContext<'a> {
    pub folders: &'a HashMap<String, Arc<Folder>>,
    pub triggers: &'a dyn TriggerFactory,
}

impl AdapterContext<'_> {
    fn push_trigger(&self, spec: &JobSpec) -> Option<Arc<dyn PushTrigger>> {
        spec.push_trigger
            .then(|| self.triggers.push_trigger(&spec.name))
    }

    fn folder(&self, spec: &JobSpec) -> Result<Option<Arc<Folder>>> {
        let Some(name) = &spec.folder else {
            return Ok(None);
        };
        self.folders
            .get(name)
            .cloned()
            .map(Some)
            .ok_or_else(|| Error::UnknownFolder {
                job: spec.name.clone(),
                folder: name.clone(),
            })
    }
}

pub type JobConstructor =
    Arc<dyn Fn(&JobSpec, &AdapterContext<'_>) -> Result<Arc<dyn Job>> + Send + Sync>;

/// Job constructors keyed by job type.
#[derive(Clone)]
pub struct AdapterRegistry {
    constructors: HashMap<String, JobConstructor>,
}

impl AdapterRegistry {
    /// Registry without any adapters; every job becomes opaque.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registry with the built-in job types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("freestyle", project_job);
        registry.register("matrix", project_job);
        registry.register("pipeline", workflow_job);
        registry.register("external", external_job);
        registry
    }

    pub fn register<F>(&mut self, kind: &str, constructor: F)
    where
        F: Fn(&JobSpec, &AdapterContext<'_>) -> Result<Arc<dyn Job>> + Send + Sync + 'static,
    {
        debug!(kind = %kind, "Registering job adapter");
        self.constructors
            .insert(kind.to_string(), Arc::new(constructor));
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    pub fn build(&self, spec: &JobSpec, ctx: &AdapterContext<'_>) -> Result<Arc<dyn Job>> {
        match self.constructors.get(&spec.kind) {
            Some(constructor) => constructor(spec, ctx),
            None => {
                debug!(job = %spec.name, kind = %spec.kind, "No adapter for job type, treating as opaque");
                Ok(Arc::new(OpaqueJob {
                    name: spec.name.clone(),
                }))
            }
        }
    }
}

fn project_job(spec: &JobSpec, ctx: &AdapterContext<'_>) -> Result<Arc<dyn Job>> {
    Ok(Arc::new(ProjectJob::new(spec, ctx)?))
}

fn workflow_job(spec: &JobSpec, ctx: &AdapterContext<'_>) -> Result<Arc<dyn Job>> {
    Ok(Arc::new(WorkflowJob::new(spec, ctx)?))
}

fn external_job(spec: &JobSpec, ctx: &AdapterContext<'_>) -> Result<Arc<dyn Job>> {
    Ok(Arc::new(ExternalJob::new(spec, ctx)?))
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// A folder, optionally generating branch jobs from declared sources.
#[derive(Debug, Clone)]
pub struct Folder {
    name: String,
    sources: Option<Vec<BranchSource>>,
}

impl Folder {
    pub fn from_spec(spec: &FolderSpec) -> Self {
        Self {
            name: spec.name.clone(),
            sources: spec.sources.clone(),
        }
    }
}

impl ItemGroup for Folder {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn as_branch_project(&self) -> Option<&dyn BranchProject> {
        self.sources.as_ref().map(|_| self as &dyn BranchProject)
    }
}

impl BranchProject for Folder {
    fn sources(&self) -> Result<Vec<BranchSource>> {
        Ok(self.sources.clone().unwrap_or_default())
    }
}

/// Freestyle and matrix projects: SCM slot plus a direct trigger accessor.
pub struct ProjectJob {
    name: String,
    scm: Option<Scm>,
    last_build: Option<BuildRecord>,
    push: Option<Arc<dyn PushTrigger>>,
}

impl ProjectJob {
    fn new(spec: &JobSpec, ctx: &AdapterContext<'_>) -> Result<Self> {
        // Project jobs match on their own SCM only, but the folder must exist.
        ctx.folder(spec)?;
        Ok(Self {
            name: spec.name.clone(),
            scm: spec.scm.clone(),
            last_build: spec.last_build.clone(),
            push: ctx.push_trigger(spec),
        })
    }
}

impl Job for ProjectJob {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn as_project(&self) -> Option<&dyn ScmProject> {
        Some(self)
    }

    fn last_build(&self) -> Result<Option<BuildRecord>> {
        Ok(self.last_build.clone())
    }
}

impl ScmProject for ProjectJob {
    fn scm(&self) -> Option<&Scm> {
        self.scm.as_ref()
    }

    fn push_trigger(&self) -> Option<Arc<dyn PushTrigger>> {
        self.push.clone()
    }
}

/// Pipeline jobs: definition, optional parent folder and a trigger map.
pub struct WorkflowJob {
    name: String,
    definition: Option<FlowDefinition>,
    parent: Option<Arc<Folder>>,
    last_build: Option<BuildRecord>,
    triggers: BTreeMap<String, Trigger>,
}

impl WorkflowJob {
    fn new(spec: &JobSpec, ctx: &AdapterContext<'_>) -> Result<Self> {
        let mut triggers = BTreeMap::new();
        if let Some(push) = ctx.push_trigger(spec) {
            triggers.insert(PUSH_TRIGGER_KEY.to_string(), Trigger::Push(push));
        }
        if let Some(schedule) = &spec.schedule {
            triggers.insert(
                TIMER_TRIGGER_KEY.to_string(),
                Trigger::Timer {
                    spec: schedule.clone(),
                },
            );
        }

        Ok(Self {
            name: spec.name.clone(),
            definition: spec.definition.clone(),
            parent: ctx.folder(spec)?,
            last_build: spec.last_build.clone(),
            triggers,
        })
    }
}

impl Job for WorkflowJob {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn as_pipeline(&self) -> Option<&dyn PipelineJob> {
        Some(self)
    }

    fn last_build(&self) -> Result<Option<BuildRecord>> {
        Ok(self.last_build.clone())
    }

    fn triggers(&self) -> Option<&BTreeMap<String, Trigger>> {
        Some(&self.triggers)
    }
}

impl PipelineJob for WorkflowJob {
    fn definition(&self) -> Option<&FlowDefinition> {
        self.definition.as_ref()
    }

    fn parent(&self) -> Option<&dyn ItemGroup> {
        self.parent.as_deref().map(|folder| folder as &dyn ItemGroup)
    }
}

/// Jobs from third-party job types: only a build history and a typed
/// trigger lookup.
pub struct ExternalJob {
    name: String,
    last_build: Option<BuildRecord>,
    push: Option<Arc<dyn PushTrigger>>,
    schedule: Option<String>,
}

impl ExternalJob {
    fn new(spec: &JobSpec, ctx: &AdapterContext<'_>) -> Result<Self> {
        ctx.folder(spec)?;
        Ok(Self {
            name: spec.name.clone(),
            last_build: spec.last_build.clone(),
            push: ctx.push_trigger(spec),
            schedule: spec.schedule.clone(),
        })
    }
}

impl Job for ExternalJob {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn last_build(&self) -> Result<Option<BuildRecord>> {
        Ok(self.last_build.clone())
    }

    fn trigger(&self, kind: TriggerKind) -> Option<Trigger> {
        match kind {
            TriggerKind::Push => self.push.clone().map(Trigger::Push),
            TriggerKind::Timer => self
                .schedule
                .clone()
                .map(|spec| Trigger::Timer { spec }),
            TriggerKind::ScmPoll => None,
        }
    }
}

/// A job of a type no adapter understands. Has no capabilities.
pub struct OpaqueJob {
    name: String,
}

impl Job for OpaqueJob {
    fn full_name(&self) -> &str {
        &self.name
    }
}
