//! Source-control configuration attached to jobs.
//!
//! These types mirror what a job host records about its checkouts. Only
//! [`Scm::Git`] carries URLs the matcher understands; every other variant is
//! kept so that catalogs describing real hosts can round-trip through the
//! registry without losing information.

use serde::{Deserialize, Serialize};

/// A job's SCM configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scm {
    Git(GitScm),
    /// Several SCMs checked out side by side.
    Multi {
        #[serde(default)]
        scms: Vec<Scm>,
    },
    None,
    /// Any SCM type without remote URLs we can read (Subversion, Mercurial...).
    Other {
        kind: String,
    },
}

impl Scm {
    /// Shorthand for a Git SCM with a single `origin` remote.
    pub fn git(url: impl Into<String>) -> Self {
        Scm::Git(GitScm::single(url))
    }

    pub fn as_git(&self) -> Option<&GitScm> {
        match self {
            Scm::Git(git) => Some(git),
            _ => None,
        }
    }
}

/// Git SCM configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitScm {
    #[serde(default)]
    pub remotes: Vec<RemoteConfig>,
    #[serde(default)]
    pub branches: Vec<String>,
}

impl GitScm {
    pub fn single(url: impl Into<String>) -> Self {
        Self {
            remotes: vec![RemoteConfig::origin(url)],
            branches: vec![],
        }
    }

    /// Every URI of every remote, as configured.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.remotes
            .iter()
            .flat_map(|remote| remote.urls.iter().map(String::as_str))
    }
}

/// A named Git remote. A remote can list several URIs (fetch and push).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

fn default_remote_name() -> String {
    "origin".to_string()
}

impl RemoteConfig {
    pub fn origin(url: impl Into<String>) -> Self {
        Self {
            name: default_remote_name(),
            urls: vec![url.into()],
        }
    }
}

/// Pipeline definition of a pipeline-style job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowDefinition {
    /// Script loaded from a file in a repository.
    ScriptFromScm {
        scm: Scm,
        #[serde(default = "default_script_path")]
        script_path: String,
    },
    /// Script stored inline in the job; there is no persisted SCM.
    Inline {
        #[serde(default)]
        script: String,
    },
}

fn default_script_path() -> String {
    "Jenkinsfile".to_string()
}

impl FlowDefinition {
    pub fn scm(&self) -> Option<&Scm> {
        match self {
            FlowDefinition::ScriptFromScm { scm, .. } => Some(scm),
            FlowDefinition::Inline { .. } => None,
        }
    }
}

/// One declared source of a branch-source project.
///
/// Hosts wrap sources in binding objects, so a source may hold the real
/// source one level down in `source`. The remote is read from `remote`, or
/// from `repo` for providers that only record a repository reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<Box<BranchSource>>,
    #[serde(default)]
    pub remote: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
}

impl BranchSource {
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            remote: Some(url.into()),
            ..Default::default()
        }
    }

    /// Wrap this source in a binding object.
    pub fn wrapped(self) -> Self {
        Self {
            source: Some(Box::new(self)),
            ..Default::default()
        }
    }
}

/// The SCMs a completed build recorded.
///
/// Pipeline runs record every checkout in `scms`; older build types only
/// remember the single `scm` they ran with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub number: u32,
    #[serde(default)]
    pub scms: Option<Vec<Scm>>,
    #[serde(default)]
    pub scm: Option<Scm>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_urls_flatten_remotes() {
        let git = GitScm {
            remotes: vec![
                RemoteConfig::origin("https://a.example.com/x.git"),
                RemoteConfig {
                    name: "mirror".to_string(),
                    urls: vec![
                        "https://b.example.com/x.git".to_string(),
                        "ssh://b.example.com/x.git".to_string(),
                    ],
                },
            ],
            branches: vec![],
        };

        let urls: Vec<&str> = git.urls().collect();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[2], "ssh://b.example.com/x.git");
    }

    #[test]
    fn test_scm_yaml_shapes() {
        let yaml = r#"
type: multi
scms:
  - type: git
    remotes:
      - urls: ["https://gb.example.com/bob/lib.git"]
  - type: other
    kind: subversion
  - type: none
"#;
        let scm: Scm = serde_yaml::from_str(yaml).unwrap();
        let Scm::Multi { scms } = scm else {
            panic!("expected multi scm");
        };
        assert_eq!(scms.len(), 3);
        let git = scms[0].as_git().unwrap();
        assert_eq!(git.remotes[0].name, "origin");
        assert!(scms[1].as_git().is_none());
    }

    #[test]
    fn test_inline_definition_has_no_scm() {
        let def = FlowDefinition::Inline {
            script: "node { sh 'make' }".to_string(),
        };
        assert!(def.scm().is_none());
    }
}
