// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Engine-side sink for message-targeted native actions.
//
// The manager resolves a message id to its descriptor and forwards the
// action here; the engine's own network/retry behavior behind these calls
// is a black box.  Sourced variants take an `Option` — `None` means the
// wire value did not map to a known source and the engine should run the
// plain, non-sourced variant of the operation.

use kurier_core::types::{
    InAppCloseSource, InAppDeleteSource, InAppLocation, InAppMessage,
};

/// Operations the engine exposes for a resolved in-app message.
pub trait InAppTracker: Send + Sync {
    /// Record that the message was opened.
    fn track_open(&self, message: &InAppMessage, location: InAppLocation);

    /// Record a click on a URL inside the message.
    fn track_click(&self, message: &InAppMessage, location: InAppLocation, clicked_url: &str);

    /// Record that the message was closed.
    fn track_close(
        &self,
        message: &InAppMessage,
        location: InAppLocation,
        source: Option<InAppCloseSource>,
        clicked_url: &str,
    );

    /// Consume the message: it will not be served again.
    fn consume(
        &self,
        message: &InAppMessage,
        location: InAppLocation,
        source: Option<InAppDeleteSource>,
    );

    /// Remove the message from the engine's set.
    fn remove(
        &self,
        message: &InAppMessage,
        location: InAppLocation,
        source: Option<InAppDeleteSource>,
    );

    /// Propagate a read-state change.
    fn set_read(&self, message: &InAppMessage, read: bool);

    /// Display the message now, optionally consuming it.  Returns the URL
    /// the user tapped, if any.
    fn show(&self, message: &InAppMessage, consume: bool) -> Option<String>;
}

/// No-op tracker for builds without a live engine.
#[derive(Debug, Default)]
pub struct NullTracker;

impl InAppTracker for NullTracker {
    fn track_open(&self, message: &InAppMessage, _location: InAppLocation) {
        tracing::debug!(message_id = %message.message_id, "NullTracker::track_open");
    }

    fn track_click(&self, message: &InAppMessage, _location: InAppLocation, _clicked_url: &str) {
        tracing::debug!(message_id = %message.message_id, "NullTracker::track_click");
    }

    fn track_close(
        &self,
        message: &InAppMessage,
        _location: InAppLocation,
        _source: Option<InAppCloseSource>,
        _clicked_url: &str,
    ) {
        tracing::debug!(message_id = %message.message_id, "NullTracker::track_close");
    }

    fn consume(
        &self,
        message: &InAppMessage,
        _location: InAppLocation,
        _source: Option<InAppDeleteSource>,
    ) {
        tracing::debug!(message_id = %message.message_id, "NullTracker::consume");
    }

    fn remove(
        &self,
        message: &InAppMessage,
        _location: InAppLocation,
        _source: Option<InAppDeleteSource>,
    ) {
        tracing::debug!(message_id = %message.message_id, "NullTracker::remove");
    }

    fn set_read(&self, message: &InAppMessage, _read: bool) {
        tracing::debug!(message_id = %message.message_id, "NullTracker::set_read");
    }

    fn show(&self, message: &InAppMessage, _consume: bool) -> Option<String> {
        tracing::debug!(message_id = %message.message_id, "NullTracker::show");
        None
    }
}
