// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Listener gate — "is anyone listening?" flag for the whole bridge.
//
// Opened when the application layer attaches, closed when it detaches.
// While closed, decision points short-circuit to their defaults without
// publishing anything.  Closing the gate never cancels an in-flight wait;
// it only suppresses future publishes.

use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide flag tracking whether an asynchronous answerer is attached.
///
/// Starts closed.  Both transitions are idempotent.
#[derive(Debug, Default)]
pub struct ListenerGate {
    open: AtomicBool,
}

impl ListenerGate {
    pub fn new() -> Self {
        Self {
            open: AtomicBool::new(false),
        }
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert!(!ListenerGate::new().is_open());
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let gate = ListenerGate::new();
        gate.open();
        gate.open();
        assert!(gate.is_open());
        gate.close();
        gate.close();
        assert!(!gate.is_open());
    }
}
