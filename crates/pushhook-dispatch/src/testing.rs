//! Job and trigger doubles for unit tests.

use pushhook_core::job::{
    BranchProject, ItemGroup, Job, PipelineJob, ScmProject, Trigger, TriggerKind,
};
use pushhook_core::ports::{JobRegistry, PushTrigger};
use pushhook_core::scm::{BranchSource, BuildRecord, FlowDefinition, Scm};
use pushhook_core::{Error, PushEvent, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Project,
    Pipeline,
    Opaque,
}

enum History {
    Empty,
    Build(BuildRecord),
    Broken,
}

pub struct TestJob {
    name: String,
    shape: Shape,
    scm: Option<Scm>,
    definition: Option<FlowDefinition>,
    parent: Option<TestFolder>,
    history: History,
    direct: Option<Arc<dyn PushTrigger>>,
    typed: Option<Trigger>,
    triggers: Option<BTreeMap<String, Trigger>>,
    probes: AtomicUsize,
}

impl TestJob {
    fn new(name: &str, shape: Shape) -> Self {
        Self {
            name: name.to_string(),
            shape,
            scm: None,
            definition: None,
            parent: None,
            history: History::Empty,
            direct: None,
            typed: None,
            triggers: None,
            probes: AtomicUsize::new(0),
        }
    }

    pub fn project(name: &str) -> Self {
        Self::new(name, Shape::Project)
    }

    pub fn pipeline(name: &str) -> Self {
        Self::new(name, Shape::Pipeline)
    }

    pub fn opaque(name: &str) -> Self {
        Self::new(name, Shape::Opaque)
    }

    pub fn with_scm(mut self, scm: Scm) -> Self {
        self.scm = Some(scm);
        self
    }

    pub fn with_definition(mut self, definition: FlowDefinition) -> Self {
        self.definition = Some(definition);
        self
    }

    pub fn with_parent(mut self, parent: TestFolder) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_last_build(mut self, build: BuildRecord) -> Self {
        self.history = History::Build(build);
        self
    }

    pub fn with_broken_history(mut self) -> Self {
        self.history = History::Broken;
        self
    }

    /// Bind through the direct project accessor.
    pub fn with_direct_trigger(mut self, trigger: Arc<dyn PushTrigger>) -> Self {
        self.direct = Some(trigger);
        self
    }

    /// Bind through the typed single-trigger lookup.
    pub fn with_typed_trigger(mut self, trigger: Trigger) -> Self {
        self.typed = Some(trigger);
        self
    }

    /// Bind through the named trigger map.
    pub fn with_trigger_entry(mut self, name: &str, trigger: Trigger) -> Self {
        self.triggers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), trigger);
        self
    }

    /// Number of times the job's SCM-bearing accessors were read.
    pub fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    fn probe(&self) {
        self.probes.fetch_add(1, Ordering::SeqCst);
    }
}

impl Job for TestJob {
    fn full_name(&self) -> &str {
        &self.name
    }

    fn as_project(&self) -> Option<&dyn ScmProject> {
        (self.shape == Shape::Project).then_some(self as &dyn ScmProject)
    }

    fn as_pipeline(&self) -> Option<&dyn PipelineJob> {
        (self.shape == Shape::Pipeline).then_some(self as &dyn PipelineJob)
    }

    fn last_build(&self) -> Result<Option<BuildRecord>> {
        self.probe();
        match &self.history {
            History::Empty => Ok(None),
            History::Build(build) => Ok(Some(build.clone())),
            History::Broken => Err(Error::Extraction {
                job: self.name.clone(),
                message: "build record unreadable".to_string(),
            }),
        }
    }

    fn trigger(&self, kind: TriggerKind) -> Option<Trigger> {
        self.typed
            .as_ref()
            .filter(|trigger| trigger.kind() == Some(kind))
            .cloned()
    }

    fn triggers(&self) -> Option<&BTreeMap<String, Trigger>> {
        self.triggers.as_ref()
    }
}

impl ScmProject for TestJob {
    fn scm(&self) -> Option<&Scm> {
        self.probe();
        self.scm.as_ref()
    }

    fn push_trigger(&self) -> Option<Arc<dyn PushTrigger>> {
        self.direct.clone()
    }
}

impl PipelineJob for TestJob {
    fn definition(&self) -> Option<&FlowDefinition> {
        self.probe();
        self.definition.as_ref()
    }

    fn parent(&self) -> Option<&dyn ItemGroup> {
        self.parent.as_ref().map(|folder| folder as &dyn ItemGroup)
    }
}

pub enum TestFolder {
    Plain(String),
    Branches(String, Vec<BranchSource>),
    Broken(String),
}

impl TestFolder {
    pub fn plain(name: &str) -> Self {
        TestFolder::Plain(name.to_string())
    }

    pub fn branch_project(name: &str, sources: Vec<BranchSource>) -> Self {
        TestFolder::Branches(name.to_string(), sources)
    }

    pub fn broken_branch_project(name: &str) -> Self {
        TestFolder::Broken(name.to_string())
    }
}

impl ItemGroup for TestFolder {
    fn full_name(&self) -> &str {
        match self {
            TestFolder::Plain(name) | TestFolder::Branches(name, _) | TestFolder::Broken(name) => {
                name
            }
        }
    }

    fn as_branch_project(&self) -> Option<&dyn BranchProject> {
        match self {
            TestFolder::Plain(_) => None,
            _ => Some(self as &dyn BranchProject),
        }
    }
}

impl BranchProject for TestFolder {
    fn sources(&self) -> Result<Vec<BranchSource>> {
        match self {
            TestFolder::Branches(_, sources) => Ok(sources.clone()),
            TestFolder::Broken(name) => Err(Error::Registry(format!("sources of {name} unavailable"))),
            TestFolder::Plain(_) => Ok(vec![]),
        }
    }
}

/// Trigger that counts its invocations.
#[derive(Default)]
pub struct CountingTrigger {
    calls: AtomicUsize,
}

impl CountingTrigger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PushTrigger for CountingTrigger {
    fn on_push(&self, _event: &PushEvent) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Registry over a fixed list of jobs.
pub struct TestRegistry {
    jobs: Vec<Arc<TestJob>>,
}

impl TestRegistry {
    pub fn new(jobs: Vec<Arc<TestJob>>) -> Self {
        Self { jobs }
    }
}

impl JobRegistry for TestRegistry {
    fn all_jobs(&self) -> Result<Vec<Arc<dyn Job>>> {
        Ok(self
            .jobs
            .iter()
            .map(|job| job.clone() as Arc<dyn Job>)
            .collect())
    }
}

/// Registry that cannot be listed.
pub struct UnavailableRegistry;

impl JobRegistry for UnavailableRegistry {
    fn all_jobs(&self) -> Result<Vec<Arc<dyn Job>>> {
        Err(Error::Registry("registry offline".to_string()))
    }
}
