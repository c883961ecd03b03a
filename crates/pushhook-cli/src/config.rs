//! CLI configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of the environment variables that override the config file.
pub const ENV_PREFIX: &str = "PUSHHOOK";

/// Effective configuration.
///
/// Layered from defaults, then the YAML config file, then `PUSHHOOK_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookConfig {
    /// Job catalog to load when no `--catalog` is given.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Whether multi-SCM job configurations are understood.
    #[serde(default = "default_multi_scm")]
    pub multi_scm: bool,
    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_multi_scm() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            multi_scm: default_multi_scm(),
            log_filter: default_log_filter(),
        }
    }
}

impl HookConfig {
    /// Load the configuration. An explicit path must exist; the default
    /// location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = match explicit {
            Some(path) => Some(config::File::from(path.to_path_buf()).required(true)),
            None => Self::config_path().map(|path| config::File::from(path).required(false)),
        };

        let mut builder = config::Config::builder()
            .set_default("multi_scm", default_multi_scm())?
            .set_default("log_filter", default_log_filter())?;
        if let Some(file) = file {
            builder = builder.add_source(file);
        }

        builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Default config file location.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "pushhook", "pushhook")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Catalog to use: the command-line override, else the configured one.
    pub fn catalog_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.catalog.clone())
            .context("No job catalog given: pass --catalog or set `catalog` in the config file")
    }
}
