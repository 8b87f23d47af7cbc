// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Kurier — in-app message store and manager.
//
// The engine pushes message descriptors into the store; the application
// layer queries them and fires message-targeted actions (open, click,
// close, consume, remove, mark-read) by message id.  Every entry point
// resolves the id first — a missing message is a logged no-op, never an
// error and never a partial mutation.

pub mod manager;
pub mod store;
pub mod tracker;

pub use manager::InAppManager;
pub use store::MessageStore;
pub use tracker::{InAppTracker, NullTracker};
