// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Delegate dispatch gateway — the orchestrator for all three decision
// points.
//
// Invariants:
// - a decision point blocks only the engine thread that called it, never
//   the runtime the application layer lives on;
// - exactly one publish and at most one bounded wait per invocation;
// - every path returns a valid decision; nothing propagates to the engine.

use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use kurier_core::delegate::{CustomActionDelegate, InAppDelegate, UrlDelegate};
use kurier_core::types::{
    Action, ActionContext, DecisionKind, InAppMessage, InAppShowResponse,
};

use crate::event::{BridgeEvent, EventStream};
use crate::gate::ListenerGate;
use crate::slot::DecisionSlot;

/// Reference wait for an application-layer decision before the default is
/// substituted.
pub const DEFAULT_DECISION_TIMEOUT: Duration = Duration::from_secs(2);

/// Orchestrates decision requests between the engine and the application
/// layer.
///
/// One instance per bridge.  The engine calls the decision points through
/// the `kurier_core::delegate` traits; the application layer drains the
/// [`EventStream`] returned by [`attach`](Self::attach) and answers through
/// the `set_*` setters.
#[derive(Debug)]
pub struct DispatchGateway {
    gate: ListenerGate,
    url_slot: DecisionSlot<bool>,
    in_app_slot: DecisionSlot<InAppShowResponse>,
    sender: Mutex<Option<mpsc::UnboundedSender<BridgeEvent>>>,
    timeout: Duration,
}

impl Default for DispatchGateway {
    fn default() -> Self {
        Self::new(DEFAULT_DECISION_TIMEOUT)
    }
}

impl DispatchGateway {
    pub fn new(timeout: Duration) -> Self {
        Self {
            gate: ListenerGate::new(),
            url_slot: DecisionSlot::new(),
            in_app_slot: DecisionSlot::new(),
            sender: Mutex::new(None),
            timeout,
        }
    }

    /// The configured decision timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // -- Lifecycle -----------------------------------------------------------

    /// Attach the application layer: open the gate and hand back a fresh
    /// event stream.
    ///
    /// Attaching while already attached replaces the previous stream (which
    /// then ends) and leaves the gate open.
    pub fn attach(&self) -> EventStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let previous = self
            .sender
            .lock()
            .expect("event sender lock poisoned")
            .replace(tx);
        self.gate.open();
        if previous.is_some() {
            debug!("attach replaced an existing event stream");
        }
        info!("application layer attached");
        EventStream::new(rx)
    }

    /// Detach the application layer: close the gate and drop the channel.
    ///
    /// Idempotent.  An in-flight decision wait is not cancelled — it runs to
    /// fulfillment or timeout; only future publishes are suppressed.
    pub fn detach(&self) {
        self.gate.close();
        let had_stream = self
            .sender
            .lock()
            .expect("event sender lock poisoned")
            .take()
            .is_some();
        if had_stream {
            info!("application layer detached");
        }
    }

    /// Whether an answerer is currently attached.
    pub fn is_attached(&self) -> bool {
        self.gate.is_open()
    }

    // -- Inbound decision setters --------------------------------------------

    /// Fulfill the pending URL-handling request.
    ///
    /// A stale or duplicate answer (timeout already fired, or the request
    /// was already answered) is logged and dropped.
    pub fn set_url_handled(&self, handled: bool) {
        if let Err(e) = self.url_slot.fulfill(handled) {
            warn!(handled, error = %e, "dropping url decision");
        }
    }

    /// Fulfill the pending in-app display request from its wire encoding.
    ///
    /// Unrecognized values decode to `Show` so a buggy answerer can never
    /// suppress a message.
    pub fn set_in_app_show_response(&self, raw: i64) {
        let response = InAppShowResponse::from_raw(raw).unwrap_or_else(|| {
            warn!(raw, "unrecognized in-app show response — treating as show");
            InAppShowResponse::Show
        });
        if let Err(e) = self.in_app_slot.fulfill(response) {
            warn!(raw, error = %e, "dropping in-app display decision");
        }
    }

    // -- Decision points (engine-facing) -------------------------------------

    /// Decision point (a): deep link / URL handling.  Default: not handled.
    pub fn decide_url(&self, url: &str, context: &ActionContext) -> bool {
        let kind = DecisionKind::UrlHandling;
        if !self.gate.is_open() {
            debug!(kind = kind.name(), url, "gate closed — returning default");
            return false;
        }

        let ticket = self.url_slot.arm();
        let published = self.publish(BridgeEvent::UrlDecisionRequested {
            url: url.to_owned(),
            context: context.clone(),
        });
        if !published {
            return false;
        }

        match self.url_slot.wait(ticket, self.timeout) {
            Some(handled) => {
                info!(kind = kind.name(), url, handled, "decision received");
                handled
            }
            None => {
                info!(kind = kind.name(), url, "decision timed out — returning default");
                false
            }
        }
    }

    /// Decision point (b): custom action handling.
    ///
    /// Publishes the request but does not wait: custom actions are reported
    /// as handled unconditionally once emitted.  The engine has nothing
    /// sensible to do with a "not handled" custom action, so the answer is
    /// fire-and-forget on both sides.
    pub fn decide_custom_action(&self, action: &Action, context: &ActionContext) -> bool {
        let kind = DecisionKind::CustomAction;
        if !self.gate.is_open() {
            debug!(
                kind = kind.name(),
                action = %action.action_type,
                "gate closed — returning default"
            );
            return true;
        }

        self.publish(BridgeEvent::CustomActionDecisionRequested {
            action: action.clone(),
            context: context.clone(),
        });
        true
    }

    /// Decision point (c): in-app display.  Default: show.
    pub fn decide_in_app(&self, message: &InAppMessage) -> InAppShowResponse {
        let kind = DecisionKind::InAppDisplay;
        if !self.gate.is_open() {
            debug!(
                kind = kind.name(),
                message_id = %message.message_id,
                "gate closed — returning default"
            );
            return InAppShowResponse::Show;
        }

        let ticket = self.in_app_slot.arm();
        let published = self.publish(BridgeEvent::InAppDecisionRequested {
            message: message.clone(),
        });
        if !published {
            return InAppShowResponse::Show;
        }

        match self.in_app_slot.wait(ticket, self.timeout) {
            Some(response) => {
                info!(
                    kind = kind.name(),
                    message_id = %message.message_id,
                    ?response,
                    "decision received"
                );
                response
            }
            None => {
                info!(
                    kind = kind.name(),
                    message_id = %message.message_id,
                    "decision timed out — returning default"
                );
                InAppShowResponse::Show
            }
        }
    }

    // -- Internal ------------------------------------------------------------

    /// Publish an event to the attached stream.
    ///
    /// A send failure means the receiver was dropped without a detach; the
    /// gate is closed so subsequent decisions take the fast path, and the
    /// caller returns its default without waiting.
    fn publish(&self, event: BridgeEvent) -> bool {
        let mut sender = self.sender.lock().expect("event sender lock poisoned");
        let Some(tx) = sender.as_ref() else {
            debug!(event = event.name(), "no event stream — publish skipped");
            return false;
        };
        let name = event.name();
        if tx.send(event).is_err() {
            warn!(event = name, "event stream dropped — closing gate");
            *sender = None;
            self.gate.close();
            return false;
        }
        true
    }
}

impl UrlDelegate for DispatchGateway {
    fn handle_url(&self, url: &str, context: &ActionContext) -> bool {
        self.decide_url(url, context)
    }
}

impl CustomActionDelegate for DispatchGateway {
    fn handle_custom_action(&self, action: &Action, context: &ActionContext) -> bool {
        self.decide_custom_action(action, context)
    }
}

impl InAppDelegate for DispatchGateway {
    fn on_new_message(&self, message: &InAppMessage) -> InAppShowResponse {
        self.decide_in_app(message)
    }
}
