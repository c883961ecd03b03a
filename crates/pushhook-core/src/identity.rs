//! Caller identities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who an operation runs as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Identity {
    /// Unauthenticated caller; webhook deliveries arrive as this.
    #[default]
    Anonymous,
    /// The host itself. Can read every job.
    System,
    User(String),
}

impl Identity {
    pub const SYSTEM: Identity = Identity::System;

    pub fn user(name: impl Into<String>) -> Self {
        Identity::User(name.into())
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Identity::System)
    }

    pub fn name(&self) -> &str {
        match self {
            Identity::Anonymous => "anonymous",
            Identity::System => "SYSTEM",
            Identity::User(name) => name,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
