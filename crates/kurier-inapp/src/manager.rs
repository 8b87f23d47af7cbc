// SPDX-License-Identifier: PMPL-1.0-or-later
//
// In-app manager — lookup-then-forward entry points.
//
// Mirrors the shape of the engine boundary: the application layer addresses
// messages by id and passes locations/sources in their numeric wire
// encoding.  The manager decodes, resolves the descriptor, and forwards to
// the tracker.  An unknown id is logged and skipped; an unknown source
// decodes to `None` and the tracker runs the non-sourced variant.

use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use kurier_core::types::{
    InAppCloseSource, InAppDeleteSource, InAppLocation, InAppMessage,
};

use crate::store::MessageStore;
use crate::tracker::InAppTracker;

/// Facade over the message store and the engine's tracking calls.
pub struct InAppManager {
    store: Mutex<MessageStore>,
    tracker: Arc<dyn InAppTracker>,
}

impl InAppManager {
    pub fn new(tracker: Arc<dyn InAppTracker>) -> Self {
        Self {
            store: Mutex::new(MessageStore::new()),
            tracker,
        }
    }

    // -- Message sync (engine → store) ---------------------------------------

    /// Replace the mirrored message set with a fresh sync from the engine.
    pub fn sync_messages(&self, messages: Vec<InAppMessage>) {
        let mut store = self.store.lock().expect("message store lock poisoned");
        store.sync(messages);
        debug!(count = store.len(), "in-app message set synced");
    }

    // -- Queries -------------------------------------------------------------

    /// All in-app messages, newest first.
    pub fn messages(&self) -> Vec<InAppMessage> {
        self.store
            .lock()
            .expect("message store lock poisoned")
            .messages()
    }

    /// Inbox messages, newest first.
    pub fn inbox_messages(&self) -> Vec<InAppMessage> {
        self.store
            .lock()
            .expect("message store lock poisoned")
            .inbox_messages()
    }

    /// Count of unread inbox messages.
    pub fn unread_count(&self) -> usize {
        self.store
            .lock()
            .expect("message store lock poisoned")
            .unread_count()
    }

    // -- Message-targeted operations -----------------------------------------

    /// Record an open of `message_id`.
    pub fn track_open(&self, message_id: &str, location_raw: i64) {
        let Some(message) = self.lookup(message_id, "track_open") else {
            return;
        };
        self.tracker
            .track_open(&message, InAppLocation::from_raw(location_raw));
    }

    /// Record a click on `clicked_url` inside `message_id`.
    pub fn track_click(&self, message_id: &str, location_raw: i64, clicked_url: &str) {
        let Some(message) = self.lookup(message_id, "track_click") else {
            return;
        };
        self.tracker
            .track_click(&message, InAppLocation::from_raw(location_raw), clicked_url);
    }

    /// Record a close of `message_id`.  An unrecognized `source_raw` falls
    /// back to the non-sourced close.
    pub fn track_close(
        &self,
        message_id: &str,
        location_raw: i64,
        source_raw: i64,
        clicked_url: &str,
    ) {
        let Some(message) = self.lookup(message_id, "track_close") else {
            return;
        };
        self.tracker.track_close(
            &message,
            InAppLocation::from_raw(location_raw),
            InAppCloseSource::from_raw(source_raw),
            clicked_url,
        );
    }

    /// Consume `message_id`: the engine stops serving it, and it leaves the
    /// local mirror.
    pub fn consume(&self, message_id: &str, location_raw: i64, source_raw: i64) {
        let Some(message) = self.lookup(message_id, "consume") else {
            return;
        };
        self.tracker.consume(
            &message,
            InAppLocation::from_raw(location_raw),
            InAppDeleteSource::from_raw(source_raw),
        );
        self.store
            .lock()
            .expect("message store lock poisoned")
            .remove(message_id);
    }

    /// Remove `message_id` from the engine's set and the local mirror.
    pub fn remove(&self, message_id: &str, location_raw: i64, source_raw: i64) {
        let Some(message) = self.lookup(message_id, "remove") else {
            return;
        };
        self.tracker.remove(
            &message,
            InAppLocation::from_raw(location_raw),
            InAppDeleteSource::from_raw(source_raw),
        );
        self.store
            .lock()
            .expect("message store lock poisoned")
            .remove(message_id);
    }

    /// Set the read flag on `message_id` locally and in the engine.
    pub fn set_read(&self, message_id: &str, read: bool) {
        let Some(message) = self.lookup(message_id, "set_read") else {
            return;
        };
        self.store
            .lock()
            .expect("message store lock poisoned")
            .set_read(message_id, read);
        self.tracker.set_read(&message, read);
    }

    /// Display `message_id` now.  Returns the URL the user tapped, if any;
    /// `None` for an unknown id.
    pub fn show_message(&self, message_id: &str, consume: bool) -> Option<String> {
        let message = self.lookup(message_id, "show_message")?;
        let clicked = self.tracker.show(&message, consume);
        if consume {
            self.store
                .lock()
                .expect("message store lock poisoned")
                .remove(message_id);
        }
        clicked
    }

    // -- Internal ------------------------------------------------------------

    /// Resolve a message id, logging the miss for the caller.
    fn lookup(&self, message_id: &str, operation: &str) -> Option<InAppMessage> {
        let store = self.store.lock().expect("message store lock poisoned");
        let found = store.get(message_id).cloned();
        if found.is_none() {
            error!(message_id, operation, "could not find message");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    /// Records every forwarded call so tests can assert on the boundary.
    #[derive(Debug, Default)]
    struct RecordingTracker {
        calls: StdMutex<Vec<String>>,
    }

    impl RecordingTracker {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().expect("calls lock").push(call);
        }
    }

    impl InAppTracker for RecordingTracker {
        fn track_open(&self, message: &InAppMessage, location: InAppLocation) {
            self.record(format!("open:{}:{:?}", message.message_id, location));
        }

        fn track_click(
            &self,
            message: &InAppMessage,
            location: InAppLocation,
            clicked_url: &str,
        ) {
            self.record(format!(
                "click:{}:{:?}:{}",
                message.message_id, location, clicked_url
            ));
        }

        fn track_close(
            &self,
            message: &InAppMessage,
            location: InAppLocation,
            source: Option<InAppCloseSource>,
            clicked_url: &str,
        ) {
            self.record(format!(
                "close:{}:{:?}:{:?}:{}",
                message.message_id, location, source, clicked_url
            ));
        }

        fn consume(
            &self,
            message: &InAppMessage,
            location: InAppLocation,
            source: Option<InAppDeleteSource>,
        ) {
            self.record(format!(
                "consume:{}:{:?}:{:?}",
                message.message_id, location, source
            ));
        }

        fn remove(
            &self,
            message: &InAppMessage,
            location: InAppLocation,
            source: Option<InAppDeleteSource>,
        ) {
            self.record(format!(
                "remove:{}:{:?}:{:?}",
                message.message_id, location, source
            ));
        }

        fn set_read(&self, message: &InAppMessage, read: bool) {
            self.record(format!("set_read:{}:{}", message.message_id, read));
        }

        fn show(&self, message: &InAppMessage, consume: bool) -> Option<String> {
            self.record(format!("show:{}:{}", message.message_id, consume));
            Some("https://example.com/tapped".into())
        }
    }

    fn manager_with(messages: Vec<InAppMessage>) -> (InAppManager, Arc<RecordingTracker>) {
        let tracker = Arc::new(RecordingTracker::default());
        let manager = InAppManager::new(Arc::clone(&tracker) as Arc<dyn InAppTracker>);
        manager.sync_messages(messages);
        (manager, tracker)
    }

    fn inbox_message(id: &str) -> InAppMessage {
        InAppMessage {
            save_to_inbox: true,
            ..InAppMessage::new(id, 1)
        }
    }

    #[test]
    fn track_open_forwards_the_resolved_message() {
        let (manager, tracker) = manager_with(vec![InAppMessage::new("m1", 1)]);
        manager.track_open("m1", 1);
        assert_eq!(tracker.calls(), vec!["open:m1:Inbox"]);
    }

    #[test]
    fn unknown_id_is_a_no_op_for_every_operation() {
        let (manager, tracker) = manager_with(vec![inbox_message("m1")]);

        manager.track_open("ghost", 0);
        manager.track_click("ghost", 0, "https://example.com");
        manager.track_close("ghost", 0, 0, "");
        manager.consume("ghost", 0, 0);
        manager.remove("ghost", 0, 0);
        manager.set_read("ghost", true);
        assert_eq!(manager.show_message("ghost", true), None);

        assert!(tracker.calls().is_empty());
        // No partial state mutation either.
        assert_eq!(manager.unread_count(), 1);
        assert_eq!(manager.messages().len(), 1);
    }

    #[test]
    fn unrecognized_close_source_uses_the_non_sourced_variant() {
        let (manager, tracker) = manager_with(vec![InAppMessage::new("m1", 1)]);
        manager.track_close("m1", 0, 42, "https://example.com");
        assert_eq!(
            tracker.calls(),
            vec!["close:m1:InApp:None:https://example.com"]
        );
    }

    #[test]
    fn recognized_delete_source_is_forwarded() {
        let (manager, tracker) = manager_with(vec![InAppMessage::new("m1", 1)]);
        manager.remove("m1", 1, 1);
        assert_eq!(tracker.calls(), vec!["remove:m1:Inbox:Some(DeleteButton)"]);
        assert!(manager.messages().is_empty());
    }

    #[test]
    fn consume_drops_the_message_from_the_mirror() {
        let (manager, tracker) = manager_with(vec![InAppMessage::new("m1", 1)]);
        manager.consume("m1", 0, 99);
        assert_eq!(tracker.calls(), vec!["consume:m1:InApp:None"]);
        assert!(manager.messages().is_empty());
    }

    #[test]
    fn set_read_updates_mirror_and_engine() {
        let (manager, tracker) = manager_with(vec![inbox_message("m1")]);
        assert_eq!(manager.unread_count(), 1);

        manager.set_read("m1", true);
        assert_eq!(manager.unread_count(), 0);
        assert_eq!(tracker.calls(), vec!["set_read:m1:true"]);
    }

    #[test]
    fn show_message_returns_the_tapped_url_and_honors_consume() {
        let (manager, tracker) = manager_with(vec![InAppMessage::new("m1", 1)]);
        let url = manager.show_message("m1", true);
        assert_eq!(url.as_deref(), Some("https://example.com/tapped"));
        assert_eq!(tracker.calls(), vec!["show:m1:true"]);
        assert!(manager.messages().is_empty());
    }

    #[test]
    fn show_without_consume_keeps_the_message() {
        let (manager, _tracker) = manager_with(vec![InAppMessage::new("m1", 1)]);
        manager.show_message("m1", false);
        assert_eq!(manager.messages().len(), 1);
    }
}
