// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Single-assignment decision cell.
//
// One slot exists per decision kind, shared across requests of that kind.
// Each request arms the slot and receives an epoch ticket; the ticket keys
// the wait so that a late fulfillment (after timeout) or a superseding
// request can never hand a value to the wrong caller.  Fulfillment and
// timeout race under a single mutex: exactly one of them resolves the wait.

use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Why a fulfillment was rejected.
///
/// Rejections are expected in normal operation (the application layer
/// answered after the engine gave up) — callers log and drop them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    /// No request of this kind is currently awaiting a decision.
    #[error("no pending decision request")]
    NoPendingDecision,

    /// The pending request was already fulfilled once.
    #[error("decision already fulfilled")]
    AlreadyFulfilled,
}

#[derive(Debug)]
struct SlotState<T> {
    /// Bumped on every `arm`; a waiter only accepts a value under its own
    /// epoch.
    epoch: u64,
    /// True while a request is awaiting fulfillment.
    armed: bool,
    /// The fulfilled decision, if it arrived.
    value: Option<T>,
}

/// Synchronization cell that hands one decision from the asynchronous
/// answerer to the blocked caller.
#[derive(Debug)]
pub struct DecisionSlot<T> {
    state: Mutex<SlotState<T>>,
    fulfilled: Condvar,
}

impl<T> Default for DecisionSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DecisionSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                epoch: 0,
                armed: false,
                value: None,
            }),
            fulfilled: Condvar::new(),
        }
    }

    /// Reset the slot to empty for a new request and return the request's
    /// correlation ticket.
    ///
    /// Arming while a previous request of the same kind is still waiting
    /// supersedes it: the old waiter wakes with no value and the new request
    /// owns the slot.
    pub fn arm(&self) -> u64 {
        let mut state = self.state.lock().expect("slot lock poisoned");
        state.epoch += 1;
        state.armed = true;
        state.value = None;
        self.fulfilled.notify_all();
        state.epoch
    }

    /// Fulfill the pending request with `value`.
    ///
    /// Rejected if no request is pending or if the pending request was
    /// already fulfilled; the value is dropped in both cases.
    pub fn fulfill(&self, value: T) -> Result<(), SlotError> {
        let mut state = self.state.lock().expect("slot lock poisoned");
        if !state.armed {
            return Err(SlotError::NoPendingDecision);
        }
        if state.value.is_some() {
            return Err(SlotError::AlreadyFulfilled);
        }
        state.value = Some(value);
        self.fulfilled.notify_all();
        Ok(())
    }

    /// Block the calling thread until the request identified by `ticket` is
    /// fulfilled or `timeout` elapses.
    ///
    /// Returns `None` on timeout or when a newer request superseded this
    /// one.  On timeout the slot is disarmed, so a fulfillment arriving
    /// afterwards is rejected rather than delivered to a future request.
    pub fn wait(&self, ticket: u64, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock().expect("slot lock poisoned");
        loop {
            // A newer arm owns the slot now; this wait is abandoned without
            // touching the new request's state.
            if state.epoch != ticket {
                return None;
            }
            if let Some(value) = state.value.take() {
                state.armed = false;
                return Some(value);
            }
            let now = Instant::now();
            if now >= deadline {
                state.armed = false;
                return None;
            }
            let (guard, _) = self
                .fulfilled
                .wait_timeout(state, deadline - now)
                .expect("slot lock poisoned");
            state = guard;
        }
    }
}
