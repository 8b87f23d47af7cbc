// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Outbound event channel — bridge → application layer.
//
// One-directional publish of named events with structured payloads.  The
// channel is unbounded so the bridge side never blocks on publish; the
// reactive layer drains it at its own pace with `recv().await`.

use serde::Serialize;
use tokio::sync::mpsc;

use kurier_core::types::{Action, ActionContext, InAppMessage};

/// A decision request published to the application layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum BridgeEvent {
    /// A deep link / URL needs a handling decision.
    #[serde(rename = "url-decision-requested")]
    UrlDecisionRequested {
        url: String,
        context: ActionContext,
    },
    /// A custom action needs a handling decision.
    #[serde(rename = "custom-action-decision-requested")]
    CustomActionDecisionRequested {
        action: Action,
        context: ActionContext,
    },
    /// A new in-app message needs a display decision.
    #[serde(rename = "in-app-decision-requested")]
    InAppDecisionRequested { message: InAppMessage },
}

impl BridgeEvent {
    /// The wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            BridgeEvent::UrlDecisionRequested { .. } => "url-decision-requested",
            BridgeEvent::CustomActionDecisionRequested { .. } => {
                "custom-action-decision-requested"
            }
            BridgeEvent::InAppDecisionRequested { .. } => "in-app-decision-requested",
        }
    }
}

/// Receiving half of the outbound channel, handed to the application layer
/// on attach.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<BridgeEvent>,
}

impl EventStream {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<BridgeEvent>) -> Self {
        Self { rx }
    }

    /// Await the next published event.  Returns `None` once the bridge has
    /// detached this stream.
    pub async fn recv(&mut self) -> Option<BridgeEvent> {
        self.rx.recv().await
    }

    /// Synchronous receive for non-async consumers and tests.
    pub fn blocking_recv(&mut self) -> Option<BridgeEvent> {
        self.rx.blocking_recv()
    }

    /// Non-blocking poll.
    pub fn try_recv(&mut self) -> Option<BridgeEvent> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurier_core::types::ActionSource;

    #[test]
    fn events_serialize_with_wire_names() {
        let event = BridgeEvent::UrlDecisionRequested {
            url: "https://example.com/x".into(),
            context: ActionContext {
                action: Action::of_type("openUrl"),
                source: ActionSource::Push,
            },
        };
        let value = serde_json::to_value(&event).expect("serialize event");
        assert_eq!(value["event"], "url-decision-requested");
        assert_eq!(value["payload"]["url"], "https://example.com/x");
        assert_eq!(value["payload"]["context"]["source"], "push");
    }

    #[test]
    fn in_app_event_carries_the_full_descriptor() {
        let event = BridgeEvent::InAppDecisionRequested {
            message: InAppMessage::new("msg-1", 77),
        };
        assert_eq!(event.name(), "in-app-decision-requested");
        let value = serde_json::to_value(&event).expect("serialize event");
        assert_eq!(value["payload"]["message"]["messageId"], "msg-1");
        assert_eq!(value["payload"]["message"]["campaignId"], 77);
    }
}
