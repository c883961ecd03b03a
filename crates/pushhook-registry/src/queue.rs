//! Build queue fed by push triggers.

use chrono::{DateTime, Utc};
use pushhook_core::ids::BuildRequestId;
use pushhook_core::ports::PushTrigger;
use pushhook_core::{PushEvent, RemoteUrl};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

/// A request to build a job, produced when a push matched it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    pub id: BuildRequestId,
    pub job: String,
    pub repository_url: Option<RemoteUrl>,
    pub git_ref: Option<String>,
    pub after: Option<String>,
    pub requested_at: DateTime<Utc>,
}

/// Hands out push triggers for jobs by name.
pub trait TriggerFactory: Send + Sync {
    fn push_trigger(&self, job: &str) -> Arc<dyn PushTrigger>;
}

/// Sending side of the build queue.
#[derive(Debug, Clone)]
pub struct BuildQueue {
    sender: UnboundedSender<BuildRequest>,
}

impl BuildQueue {
    pub fn new() -> (Self, UnboundedReceiver<BuildRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl TriggerFactory for BuildQueue {
    fn push_trigger(&self, job: &str) -> Arc<dyn PushTrigger> {
        Arc::new(QueueingPushTrigger::new(job, self.sender.clone()))
    }
}

/// Push trigger that enqueues a [`BuildRequest`] for its job.
///
/// Sending never blocks. If nothing is draining the queue any more the
/// request is dropped with a warning.
#[derive(Debug)]
pub struct QueueingPushTrigger {
    job: String,
    sender: UnboundedSender<BuildRequest>,
}

impl QueueingPushTrigger {
    pub fn new(job: impl Into<String>, sender: UnboundedSender<BuildRequest>) -> Self {
        Self {
            job: job.into(),
            sender,
        }
    }

    pub fn job(&self) -> &str {
        &self.job
    }
}

impl PushTrigger for QueueingPushTrigger {
    fn on_push(&self, event: &PushEvent) {
        let request = BuildRequest {
            id: BuildRequestId::new(),
            job: self.job.clone(),
            repository_url: event.target_url(),
            git_ref: event.git_ref().map(str::to_string),
            after: event.after().map(str::to_string),
            requested_at: Utc::now(),
        };
        let id = request.id;

        match self.sender.send(request) {
            Ok(()) => debug!(job = %self.job, request = %id, "Build request queued"),
            Err(_) => warn!(job = %self.job, request = %id, "Build queue closed, dropping request"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event() -> PushEvent {
        PushEvent::from_value(
            "push",
            json!({
                "ref": "refs/heads/main",
                "after": "c0ffee1",
                "repository": {"clone_url": "https://gb.example.com/Alice/App.git"}
            }),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_push_enqueues_request() {
        let (queue, mut receiver) = BuildQueue::new();
        let trigger = queue.push_trigger("app");

        trigger.on_push(&event());

        let request = receiver.recv().await.unwrap();
        assert_eq!(request.job, "app");
        assert_eq!(
            request.repository_url.as_ref().map(RemoteUrl::as_str),
            Some("https://gb.example.com/alice/app.git")
        );
        assert_eq!(request.git_ref.as_deref(), Some("refs/heads/main"));
        assert_eq!(request.after.as_deref(), Some("c0ffee1"));
    }

    #[test]
    fn test_closed_queue_is_ignored() {
        let (queue, receiver) = BuildQueue::new();
        drop(receiver);

        queue.push_trigger("app").on_push(&event());
    }

    #[test]
    fn test_requests_from_one_event_have_distinct_ids() {
        let (queue, mut receiver) = BuildQueue::new();
        let event = event();

        queue.push_trigger("a").on_push(&event);
        queue.push_trigger("b").on_push(&event);

        let first = receiver.try_recv().unwrap();
        let second = receiver.try_recv().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(second.job, "b");
    }
}
