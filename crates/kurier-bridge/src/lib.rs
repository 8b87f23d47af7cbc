// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Kurier — the coordination core of the messaging bridge.
//
// The engine invokes decision points synchronously on its own internal
// threads; the application layer answers asynchronously through the event
// channel and the inbound setters.  This crate makes that meeting point
// safe: bounded blocking waits, per-request correlation tickets, and a safe
// default on every path.

pub mod dispatch;
pub mod event;
pub mod gate;
pub mod slot;

pub use dispatch::DispatchGateway;
pub use event::{BridgeEvent, EventStream};
pub use gate::ListenerGate;
pub use slot::{DecisionSlot, SlotError};
