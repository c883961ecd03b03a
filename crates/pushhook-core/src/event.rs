//! Inbound push events.

use crate::ids::DeliveryId;
use crate::remote::RemoteUrl;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event-type header value of the only event that is dispatched.
pub const PUSH_EVENT: &str = "push";

/// Repository descriptor carried by a push payload.
///
/// Older servers only send `url`; newer ones send `clone_url` as well, and
/// `url` then points at the web page rather than the clone location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub clone_url: Option<String>,
}

impl RepositoryDescriptor {
    fn from_value(value: &Value) -> Self {
        let text = |key: &str| value[key].as_str().map(|s| s.to_string());
        Self {
            name: text("name"),
            full_name: text("full_name"),
            url: text("url"),
            clone_url: text("clone_url"),
        }
    }

    /// The URL to match jobs against: `clone_url` when present, else `url`.
    pub fn repository_url(&self) -> Option<&str> {
        non_blank(self.clone_url.as_deref()).or_else(|| non_blank(self.url.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A parsed push notification. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct PushEvent {
    delivery_id: DeliveryId,
    event_type: String,
    repository: RepositoryDescriptor,
    git_ref: Option<String>,
    before: Option<String>,
    after: Option<String>,
    pusher: Option<String>,
    payload: Value,
}

impl PushEvent {
    /// Parse a raw JSON payload.
    pub fn parse(event_type: &str, payload: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| Error::InvalidPayload(e.to_string()))?;
        Self::from_value(event_type, value)
    }

    /// Build an event from an already decoded payload, which must be a JSON object.
    pub fn from_value(event_type: &str, payload: Value) -> Result<Self> {
        if !payload.is_object() {
            return Err(Error::InvalidPayload(
                "payload must be a JSON object".to_string(),
            ));
        }

        let text = |key: &str| payload[key].as_str().map(|s| s.to_string());
        let pusher = payload["pusher"]["name"]
            .as_str()
            .or_else(|| payload["pusher"]["login"].as_str())
            .map(|s| s.to_string());

        Ok(Self {
            delivery_id: DeliveryId::new(),
            event_type: event_type.to_string(),
            repository: RepositoryDescriptor::from_value(&payload["repository"]),
            git_ref: text("ref"),
            before: text("before"),
            after: text("after"),
            pusher,
            payload,
        })
    }

    pub fn delivery_id(&self) -> DeliveryId {
        self.delivery_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn is_push(&self) -> bool {
        self.event_type == PUSH_EVENT
    }

    pub fn repository(&self) -> &RepositoryDescriptor {
        &self.repository
    }

    /// Raw repository URL as sent, before normalization.
    pub fn repository_url(&self) -> Option<&str> {
        self.repository.repository_url()
    }

    /// Normalized repository URL used for matching.
    pub fn target_url(&self) -> Option<RemoteUrl> {
        self.repository_url()
            .map(RemoteUrl::normalize)
            .filter(|url| !url.is_empty())
    }

    pub fn git_ref(&self) -> Option<&str> {
        self.git_ref.as_deref()
    }

    pub fn before(&self) -> Option<&str> {
        self.before.as_deref()
    }

    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }

    pub fn pusher(&self) -> Option<&str> {
        self.pusher.as_deref()
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}
