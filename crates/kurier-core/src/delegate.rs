// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Delegate trait seams the engine calls through.
//
// The engine invokes these synchronously, on whichever internal thread the
// triggering event happens to arrive on.  Implementations must return a real
// decision on every path — never panic, never propagate an error — because
// the engine has no way to recover from a failed decision point.

use crate::types::{Action, ActionContext, InAppMessage, InAppShowResponse};

/// Decision point (a): should this deep link / URL be handled by the
/// application layer?
///
/// `false` means "not handled" and the engine falls back to its own default
/// URL handling (typically opening the system browser).
pub trait UrlDelegate: Send + Sync {
    fn handle_url(&self, url: &str, context: &ActionContext) -> bool;
}

/// Decision point (b): should this custom `action://` be handled?
pub trait CustomActionDelegate: Send + Sync {
    fn handle_custom_action(&self, action: &Action, context: &ActionContext) -> bool;
}

/// Decision point (c): how should a freshly arrived in-app message be
/// displayed?
pub trait InAppDelegate: Send + Sync {
    fn on_new_message(&self, message: &InAppMessage) -> InAppShowResponse;
}
