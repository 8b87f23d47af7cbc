// SPDX-License-Identifier: PMPL-1.0-or-later
//
// In-memory message store.
//
// Persistence is deliberately out of scope — the engine owns the durable
// copy and re-syncs on launch.  The store only mirrors the engine's current
// message set so lookups and inbox queries are cheap and synchronous.

use std::collections::HashMap;

use kurier_core::types::InAppMessage;

/// Mirror of the engine's current in-app message set, keyed by message id.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: HashMap<String, InAppMessage>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole message set with a fresh sync from the engine.
    ///
    /// Read state carried by the incoming descriptors wins; the engine is
    /// the source of truth.
    pub fn sync(&mut self, messages: Vec<InAppMessage>) {
        self.messages = messages
            .into_iter()
            .map(|m| (m.message_id.clone(), m))
            .collect();
    }

    /// Look up a message by id.
    pub fn get(&self, message_id: &str) -> Option<&InAppMessage> {
        self.messages.get(message_id)
    }

    /// All messages, newest first.
    pub fn messages(&self) -> Vec<InAppMessage> {
        let mut all: Vec<_> = self.messages.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Messages flagged for the inbox, newest first.
    pub fn inbox_messages(&self) -> Vec<InAppMessage> {
        let mut inbox: Vec<_> = self
            .messages
            .values()
            .filter(|m| m.save_to_inbox)
            .cloned()
            .collect();
        inbox.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        inbox
    }

    /// Count of unread inbox messages.
    pub fn unread_count(&self) -> usize {
        self.messages
            .values()
            .filter(|m| m.save_to_inbox && !m.read)
            .count()
    }

    /// Set the read flag on a message.  Returns false if the id is unknown.
    pub fn set_read(&mut self, message_id: &str, read: bool) -> bool {
        match self.messages.get_mut(message_id) {
            Some(message) => {
                message.read = read;
                true
            }
            None => false,
        }
    }

    /// Remove a message.  Returns the removed descriptor, if any.
    pub fn remove(&mut self, message_id: &str) -> Option<InAppMessage> {
        self.messages.remove(message_id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn inbox_message(id: &str, day: u32) -> InAppMessage {
        InAppMessage {
            save_to_inbox: true,
            created_at: Utc.with_ymd_and_hms(2026, 8, day, 0, 0, 0).single(),
            ..InAppMessage::new(id, 1)
        }
    }

    #[test]
    fn sync_replaces_the_message_set() {
        let mut store = MessageStore::new();
        store.sync(vec![InAppMessage::new("a", 1), InAppMessage::new("b", 2)]);
        assert_eq!(store.len(), 2);

        store.sync(vec![InAppMessage::new("c", 3)]);
        assert_eq!(store.len(), 1);
        assert!(store.get("a").is_none());
        assert!(store.get("c").is_some());
    }

    #[test]
    fn inbox_queries_filter_and_sort_newest_first() {
        let mut store = MessageStore::new();
        store.sync(vec![
            inbox_message("old", 1),
            inbox_message("new", 20),
            InAppMessage::new("overlay-only", 9),
        ]);

        let inbox = store.inbox_messages();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].message_id, "new");
        assert_eq!(inbox[1].message_id, "old");
        assert_eq!(store.messages().len(), 3);
    }

    #[test]
    fn unread_count_tracks_read_transitions() {
        let mut store = MessageStore::new();
        store.sync(vec![inbox_message("a", 1), inbox_message("b", 2)]);
        assert_eq!(store.unread_count(), 2);

        assert!(store.set_read("a", true));
        assert_eq!(store.unread_count(), 1);

        assert!(store.set_read("a", false));
        assert_eq!(store.unread_count(), 2);
    }

    #[test]
    fn set_read_on_unknown_id_reports_failure() {
        let mut store = MessageStore::new();
        assert!(!store.set_read("ghost", true));
    }

    #[test]
    fn remove_returns_the_descriptor() {
        let mut store = MessageStore::new();
        store.sync(vec![InAppMessage::new("a", 1)]);
        assert_eq!(store.remove("a").map(|m| m.campaign_id), Some(1));
        assert!(store.remove("a").is_none());
        assert!(store.is_empty());
    }
}
