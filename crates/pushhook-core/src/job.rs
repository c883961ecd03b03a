//! Job handles and the capabilities they may expose.
//!
//! A host has many incompatible kinds of job: freestyle projects with an SCM
//! slot, pipelines whose SCM hides inside their definition, branches
//! generated by a branch-source project, pipelines with an inline script
//! whose checkouts are only visible on past builds. No single interface
//! yields "the remote URLs of this job", so [`Job`] instead exposes optional
//! capabilities. Every accessor defaults to "absent", and an adapter
//! overrides only the ones its job kind actually has.

use crate::ports::PushTrigger;
use crate::scm::{BranchSource, BuildRecord, FlowDefinition, Scm};
use crate::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A job known to the host.
pub trait Job: Send + Sync {
    /// Slash-separated name, unique within the registry.
    fn full_name(&self) -> &str;

    /// Project-shaped jobs with a directly configured SCM slot.
    fn as_project(&self) -> Option<&dyn ScmProject> {
        None
    }

    /// Pipeline-shaped jobs.
    fn as_pipeline(&self) -> Option<&dyn PipelineJob> {
        None
    }

    /// Most recent build, if the job keeps a build history.
    ///
    /// Hosts may load builds lazily, hence the `Result`.
    fn last_build(&self) -> Result<Option<BuildRecord>> {
        Ok(None)
    }

    /// Typed single-trigger lookup.
    fn trigger(&self, _kind: TriggerKind) -> Option<Trigger> {
        None
    }

    /// All triggers keyed by descriptor name, for jobs that keep them in a map.
    fn triggers(&self) -> Option<&BTreeMap<String, Trigger>> {
        None
    }
}

/// Capability of project-shaped jobs (freestyle, matrix).
pub trait ScmProject {
    /// The configured SCM; `None` when the slot is empty.
    fn scm(&self) -> Option<&Scm>;

    /// Direct accessor for the push trigger.
    fn push_trigger(&self) -> Option<Arc<dyn PushTrigger>>;
}

/// Capability of pipeline-shaped jobs.
pub trait PipelineJob {
    fn definition(&self) -> Option<&FlowDefinition>;

    /// The folder containing this job, if any.
    fn parent(&self) -> Option<&dyn ItemGroup> {
        None
    }
}

/// A container of jobs.
pub trait ItemGroup: Send + Sync {
    fn full_name(&self) -> &str;

    fn as_branch_project(&self) -> Option<&dyn BranchProject> {
        None
    }
}

/// A container that generates one job per discovered branch.
pub trait BranchProject {
    fn sources(&self) -> Result<Vec<BranchSource>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    Push,
    Timer,
    ScmPoll,
}

/// A trigger configured on a job.
#[derive(Clone)]
pub enum Trigger {
    Push(Arc<dyn PushTrigger>),
    Timer { spec: String },
    ScmPoll { spec: String },
    Other(String),
}

impl Trigger {
    pub fn kind(&self) -> Option<TriggerKind> {
        match self {
            Trigger::Push(_) => Some(TriggerKind::Push),
            Trigger::Timer { .. } => Some(TriggerKind::Timer),
            Trigger::ScmPoll { .. } => Some(TriggerKind::ScmPoll),
            Trigger::Other(_) => None,
        }
    }

    pub fn as_push(&self) -> Option<&Arc<dyn PushTrigger>> {
        match self {
            Trigger::Push(trigger) => Some(trigger),
            _ => None,
        }
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Push(_) => f.write_str("Push"),
            Trigger::Timer { spec } => f.debug_struct("Timer").field("spec", spec).finish(),
            Trigger::ScmPoll { spec } => f.debug_struct("ScmPoll").field("spec", spec).finish(),
            Trigger::Other(name) => f.debug_tuple("Other").field(name).finish(),
        }
    }
}
