//! Remote repository URL normalization.
//!
//! Every URL that takes part in matching, whether it comes from a webhook
//! payload or from a job's SCM configuration, goes through [`normalize`]
//! first. Two repositories are the same iff their normalized forms are
//! byte-equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Canonicalize a remote URL.
///
/// The input is lowercased and trimmed before parsing, so the parse decision
/// is the same on a second pass. Credentials are then removed when the scheme
/// has an authority. Input that does not parse as a URL (scp-style
/// `git@host:repo`, bare paths) is kept as opaque text.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let trimmed = lowered.trim();

    match Url::parse(trimmed) {
        Ok(mut parsed) => {
            strip_credentials(&mut parsed);
            // Serialization may percent-encode, which can reintroduce capitals.
            String::from(parsed).to_lowercase().trim().to_string()
        }
        Err(_) => trimmed.to_string(),
    }
}

fn strip_credentials(url: &mut Url) {
    // Both setters refuse URLs without a host (mailto:, file:); those cannot
    // carry credentials in the first place.
    let _ = url.set_password(None);
    let _ = url.set_username("");
}

/// A normalized remote repository URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RemoteUrl(String);

impl RemoteUrl {
    pub fn normalize(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RemoteUrl {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<RemoteUrl> for String {
    fn from(url: RemoteUrl) -> Self {
        url.0
    }
}

impl AsRef<str> for RemoteUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
