//! Test fixtures for creating sample jobs and payloads.

use pushhook_core::scm::{BranchSource, BuildRecord, FlowDefinition, Scm};
use pushhook_registry::{Catalog, FolderSpec, JobSpec};
use serde_json::json;

/// Factory for catalog job declarations.
pub struct JobFixture;

impl JobFixture {
    /// Freestyle job with a single Git remote and a push binding.
    pub fn freestyle(name: &str, url: &str) -> JobSpec {
        JobSpec {
            scm: Some(Scm::git(url)),
            push_trigger: true,
            ..JobSpec::new(name, "freestyle")
        }
    }

    /// Matrix job checking out several Git repositories.
    pub fn multi_scm(name: &str, urls: &[&str]) -> JobSpec {
        JobSpec {
            scm: Some(Scm::Multi {
                scms: urls.iter().map(|url| Scm::git(*url)).collect(),
            }),
            push_trigger: true,
            ..JobSpec::new(name, "matrix")
        }
    }

    /// Job with no SCM and no push binding.
    pub fn unbound(name: &str) -> JobSpec {
        JobSpec::new(name, "freestyle")
    }

    /// Pipeline loading its script from a Git repository.
    pub fn pipeline_from_scm(name: &str, url: &str) -> JobSpec {
        JobSpec {
            definition: Some(FlowDefinition::ScriptFromScm {
                scm: Scm::git(url),
                script_path: "Jenkinsfile".to_string(),
            }),
            push_trigger: true,
            ..JobSpec::new(name, "pipeline")
        }
    }

    /// Branch job generated by a branch-source folder.
    pub fn branch_job(name: &str, folder: &str) -> JobSpec {
        JobSpec {
            folder: Some(folder.to_string()),
            definition: Some(FlowDefinition::Inline {
                script: String::new(),
            }),
            push_trigger: true,
            ..JobSpec::new(name, "pipeline")
        }
    }

    /// Third-party job whose only URL evidence is its last build.
    pub fn external_built_from(name: &str, url: &str) -> JobSpec {
        JobSpec {
            last_build: Some(BuildRecord {
                number: 1,
                scms: Some(vec![Scm::git(url)]),
                scm: None,
            }),
            push_trigger: true,
            ..JobSpec::new(name, "external")
        }
    }
}

/// Branch-source folder whose single source is wrapped in a binding object.
pub fn branch_folder(name: &str, remote: &str) -> FolderSpec {
    FolderSpec {
        name: name.to_string(),
        sources: Some(vec![BranchSource::remote(remote).wrapped()]),
    }
}

pub fn catalog(jobs: Vec<JobSpec>) -> Catalog {
    Catalog {
        folders: vec![],
        jobs,
    }
}

/// Factory for webhook payload bodies.
pub struct PayloadFixture;

impl PayloadFixture {
    /// Push payload carrying only `clone_url`.
    pub fn push(clone_url: &str) -> String {
        json!({
            "ref": "refs/heads/main",
            "before": "0000000000000000000000000000000000000000",
            "after": "3f786850e387550fdab836ed7e6dc881de23001b",
            "pusher": {"name": "alice"},
            "repository": {"name": "app", "clone_url": clone_url}
        })
        .to_string()
    }

    /// Push payload from an older server that only sends `url`.
    pub fn legacy(url: &str) -> String {
        json!({
            "ref": "refs/heads/main",
            "repository": {"name": "app", "url": url}
        })
        .to_string()
    }

    /// Push payload with both fields set.
    pub fn with_both(url: &str, clone_url: &str) -> String {
        json!({
            "ref": "refs/heads/main",
            "repository": {"name": "app", "url": url, "clone_url": clone_url}
        })
        .to_string()
    }
}
