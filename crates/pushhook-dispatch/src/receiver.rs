//! Webhook entry point.

use crate::dispatcher::{DispatchReport, Dispatcher};
use pushhook_auth::{ThreadLocalSecurityContext, run_elevated};
use pushhook_core::PushEvent;
use pushhook_core::event::PUSH_EVENT;
use pushhook_core::ports::SecurityContext;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors reported back to the webhook caller.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Not intended to be browsed interactively (must specify payload parameter)")]
    MissingPayload,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Dispatch(#[from] pushhook_core::Error),
}

/// What happened to an accepted webhook call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Receipt {
    /// The event was not a push.
    Ignored { event: Option<String> },
    /// The push named no repository to match against.
    NoRepositoryUrl,
    Dispatched(DispatchReport),
}

/// Accepts webhook calls and dispatches pushes.
///
/// The receiver is shared between request threads and holds no identity of
/// its own. Each call elevates either the calling thread's identity or a
/// context owned by that one call.
pub struct WebhookReceiver {
    dispatcher: Dispatcher,
}

impl WebhookReceiver {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Handle one webhook call as the calling thread's identity.
    pub fn receive(
        &self,
        event: Option<&str>,
        payload: Option<&str>,
    ) -> Result<Receipt, WebhookError> {
        self.receive_in(&ThreadLocalSecurityContext::new(), event, payload)
    }

    /// Handle one webhook call, elevating within `context`.
    ///
    /// `context` must belong to this call alone. Sharing one request context
    /// between overlapping calls lets one call restore another's elevation.
    pub fn receive_in(
        &self,
        context: &dyn SecurityContext,
        event: Option<&str>,
        payload: Option<&str>,
    ) -> Result<Receipt, WebhookError> {
        debug!(event = ?event, "Webhook received");

        let Some(event_type) = event.filter(|e| *e == PUSH_EVENT) else {
            debug!(event = ?event, "Ignoring unsupported event");
            return Ok(Receipt::Ignored {
                event: event.map(str::to_string),
            });
        };

        let payload = payload.ok_or(WebhookError::MissingPayload)?;
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;
        if !value.is_object() {
            return Err(WebhookError::MalformedPayload(
                "payload must be a JSON object".to_string(),
            ));
        }

        debug!(
            payload = %serde_json::to_string_pretty(&value).unwrap_or_default(),
            "Push payload"
        );

        let push = PushEvent::from_value(event_type, value)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))?;

        let report = run_elevated(context, || self.dispatcher.dispatch(&push))?;
        Ok(report.map_or(Receipt::NoRepositoryUrl, Receipt::Dispatched))
    }
}
