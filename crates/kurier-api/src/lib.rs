// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Kurier — top-level SDK surface.
//
// Applications construct a `Sdk` from a `BridgeConfig` and a
// `MessagingEngine`, attach a listener to drain decision events, and answer
// pending decisions through the inbound setters.  Everything else here is a
// re-export so callers can depend on this crate alone.

pub mod engine;
pub mod sdk;

pub use engine::{DelegateSet, MessagingEngine, StubEngine};
pub use sdk::{load_config, persist_config, Sdk};

pub use kurier_bridge::{BridgeEvent, DispatchGateway, EventStream};
pub use kurier_core::config::{BridgeConfig, LogLevel};
pub use kurier_core::error::{KurierError, Result};
pub use kurier_core::types::{
    Action, ActionContext, ActionSource, InAppCloseSource, InAppDeleteSource, InAppLocation,
    InAppMessage, InAppShowResponse, InboxMetadata,
};
pub use kurier_inapp::{InAppManager, InAppTracker, NullTracker};
