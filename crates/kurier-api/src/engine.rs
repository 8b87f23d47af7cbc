// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Messaging-engine abstraction.
//
// The engine is the native layer that fetches messages, fires push/deep-link
// events, and calls back into the registered delegates on its own threads.
// The SDK only ever talks to it through this trait; the real binding lives
// out-of-tree, and `StubEngine` stands in for desktop/CI builds.

use std::sync::{Arc, Mutex};

use kurier_core::config::BridgeConfig;
use kurier_core::delegate::{CustomActionDelegate, InAppDelegate, UrlDelegate};
use kurier_core::error::Result;
use kurier_core::types::{
    InAppCloseSource, InAppDeleteSource, InAppLocation, InAppMessage,
};
use kurier_inapp::InAppTracker;

/// Delegates handed to the engine at configure time.
///
/// A `None` slot means the application declared no handler for that decision
/// kind; the engine then applies the built-in default without a round trip.
#[derive(Clone, Default)]
pub struct DelegateSet {
    pub url: Option<Arc<dyn UrlDelegate>>,
    pub custom_action: Option<Arc<dyn CustomActionDelegate>>,
    pub in_app: Option<Arc<dyn InAppDelegate>>,
}

impl DelegateSet {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.custom_action.is_none() && self.in_app.is_none()
    }
}

/// The native messaging engine behind the SDK.
///
/// Message-targeted tracking calls come in through the `InAppTracker`
/// supertrait; `configure` runs once at SDK initialization.
pub trait MessagingEngine: InAppTracker {
    /// Human-readable engine name for logs.
    fn engine_name(&self) -> &str;

    /// Start the engine with the given API key, config, and delegates.
    fn configure(&self, api_key: &str, config: &BridgeConfig, delegates: DelegateSet)
        -> Result<()>;
}

// -- Stub engine -------------------------------------------------------------

struct StubConfiguration {
    api_key: String,
    config: BridgeConfig,
    delegates: DelegateSet,
}

/// No-network engine for desktop builds and tests.
///
/// Records its configuration and exposes the registered delegates so a test
/// or demo harness can play the engine's role and drive decisions itself.
#[derive(Default)]
pub struct StubEngine {
    configured: Mutex<Option<StubConfiguration>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.configured
            .lock()
            .expect("stub configuration lock poisoned")
            .is_some()
    }

    /// The delegates registered at configure time, if any.
    pub fn delegates(&self) -> DelegateSet {
        self.configured
            .lock()
            .expect("stub configuration lock poisoned")
            .as_ref()
            .map(|c| c.delegates.clone())
            .unwrap_or_default()
    }

    /// The API key passed at configure time.
    pub fn api_key(&self) -> Option<String> {
        self.configured
            .lock()
            .expect("stub configuration lock poisoned")
            .as_ref()
            .map(|c| c.api_key.clone())
    }

    /// The config snapshot taken at configure time.
    pub fn config(&self) -> Option<BridgeConfig> {
        self.configured
            .lock()
            .expect("stub configuration lock poisoned")
            .as_ref()
            .map(|c| c.config.clone())
    }
}

impl MessagingEngine for StubEngine {
    fn engine_name(&self) -> &str {
        "Stub engine"
    }

    fn configure(
        &self,
        api_key: &str,
        config: &BridgeConfig,
        delegates: DelegateSet,
    ) -> Result<()> {
        tracing::info!(
            url = delegates.url.is_some(),
            custom_action = delegates.custom_action.is_some(),
            in_app = delegates.in_app.is_some(),
            "stub engine configured"
        );
        *self
            .configured
            .lock()
            .expect("stub configuration lock poisoned") = Some(StubConfiguration {
            api_key: api_key.to_owned(),
            config: config.clone(),
            delegates,
        });
        Ok(())
    }
}

impl InAppTracker for StubEngine {
    fn track_open(&self, message: &InAppMessage, _location: InAppLocation) {
        tracing::warn!(message_id = %message.message_id, "InAppTracker::track_open on stub engine");
    }

    fn track_click(&self, message: &InAppMessage, _location: InAppLocation, _clicked_url: &str) {
        tracing::warn!(message_id = %message.message_id, "InAppTracker::track_click on stub engine");
    }

    fn track_close(
        &self,
        message: &InAppMessage,
        _location: InAppLocation,
        _source: Option<InAppCloseSource>,
        _clicked_url: &str,
    ) {
        tracing::warn!(message_id = %message.message_id, "InAppTracker::track_close on stub engine");
    }

    fn consume(
        &self,
        message: &InAppMessage,
        _location: InAppLocation,
        _source: Option<InAppDeleteSource>,
    ) {
        tracing::warn!(message_id = %message.message_id, "InAppTracker::consume on stub engine");
    }

    fn remove(
        &self,
        message: &InAppMessage,
        _location: InAppLocation,
        _source: Option<InAppDeleteSource>,
    ) {
        tracing::warn!(message_id = %message.message_id, "InAppTracker::remove on stub engine");
    }

    fn set_read(&self, message: &InAppMessage, _read: bool) {
        tracing::warn!(message_id = %message.message_id, "InAppTracker::set_read on stub engine");
    }

    fn show(&self, message: &InAppMessage, _consume: bool) -> Option<String> {
        tracing::warn!(message_id = %message.message_id, "InAppTracker::show on stub engine");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_engine_records_its_configuration() {
        let engine = StubEngine::new();
        assert!(!engine.is_configured());
        assert!(engine.delegates().is_empty());

        engine
            .configure("key-123", &BridgeConfig::default(), DelegateSet::default())
            .expect("stub configure never fails");

        assert!(engine.is_configured());
        assert_eq!(engine.api_key().as_deref(), Some("key-123"));
        assert!(engine.config().is_some());
    }
}
