//! Job catalog documents.
//!
//! A catalog describes the jobs and folders of a host in YAML or JSON:
//!
//! ```yaml
//! folders:
//!   - name: app
//!     sources:
//!       - source: { remote: https://gb.example.com/alice/app.git }
//! jobs:
//!   - name: app-build
//!     type: freestyle
//!     push_trigger: true
//!     scm: { type: git, remotes: [{ urls: [https://gb.example.com/alice/app.git] }] }
//!   - name: app/main
//!     type: pipeline
//!     folder: app
//!     push_trigger: true
//! ```

use pushhook_core::scm::{BranchSource, BuildRecord, FlowDefinition, Scm};
use pushhook_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub folders: Vec<FolderSpec>,
    #[serde(default)]
    pub jobs: Vec<JobSpec>,
}

/// A job as declared in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub name: String,
    /// Adapter name, e.g. `freestyle` or `pipeline`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub scm: Option<Scm>,
    #[serde(default)]
    pub definition: Option<FlowDefinition>,
    /// Name of the containing folder.
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub last_build: Option<BuildRecord>,
    #[serde(default)]
    pub push_trigger: bool,
    /// Cron-style spec of a timer trigger, kept alongside the push binding.
    #[serde(default)]
    pub schedule: Option<String>,
}

impl JobSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            scm: None,
            definition: None,
            folder: None,
            last_build: None,
            push_trigger: false,
            schedule: None,
        }
    }
}

/// A folder. Folders that declare `sources` are branch-source projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSpec {
    pub name: String,
    #[serde(default)]
    pub sources: Option<Vec<BranchSource>>,
}

impl Catalog {
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a catalog file. `.json` files are read as JSON, everything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        };
        catalog.map_err(|e| Error::Catalog(format!("{}: {e}", path.display())))
    }

    pub fn folder(&self, name: &str) -> Option<&FolderSpec> {
        self.folders.iter().find(|folder| folder.name == name)
    }
}
