// SPDX-License-Identifier: PMPL-1.0-or-later
//
// SDK facade — wires the engine, the dispatch gateway, and the in-app layer.
//
// `initialize` builds the object graph once: the gateway becomes the engine's
// delegate for every decision kind the application declared a handler for,
// and the engine doubles as the tracker behind the in-app manager.  All other
// methods are thin pass-throughs so callers hold a single handle.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use kurier_bridge::{DispatchGateway, EventStream};
use kurier_core::config::BridgeConfig;
use kurier_core::delegate::{CustomActionDelegate, InAppDelegate, UrlDelegate};
use kurier_core::error::Result;
use kurier_core::types::InAppMessage;
use kurier_inapp::{InAppManager, InAppTracker};

use crate::engine::{DelegateSet, MessagingEngine};

/// Top-level SDK handle.
pub struct Sdk {
    config: BridgeConfig,
    gateway: Arc<DispatchGateway>,
    manager: Arc<InAppManager>,
}

impl Sdk {
    /// Configure the engine and wire the delegate graph.
    ///
    /// Only decision kinds whose handler-present flag is set in `config` get
    /// a delegate; for the rest the engine applies its built-in default
    /// without ever reaching the gateway.
    pub fn initialize<E>(api_key: &str, config: BridgeConfig, engine: Arc<E>) -> Result<Self>
    where
        E: MessagingEngine + 'static,
    {
        let gateway = Arc::new(DispatchGateway::new(config.decision_timeout()));

        let delegates = DelegateSet {
            url: config
                .url_handler_present
                .then(|| Arc::clone(&gateway) as Arc<dyn UrlDelegate>),
            custom_action: config
                .custom_action_handler_present
                .then(|| Arc::clone(&gateway) as Arc<dyn CustomActionDelegate>),
            in_app: config
                .in_app_handler_present
                .then(|| Arc::clone(&gateway) as Arc<dyn InAppDelegate>),
        };

        info!(
            engine = engine.engine_name(),
            timeout_ms = config.decision_timeout_ms,
            "initializing SDK"
        );
        engine.configure(api_key, &config, delegates)?;

        let manager = Arc::new(InAppManager::new(engine as Arc<dyn InAppTracker>));

        Ok(Self {
            config,
            gateway,
            manager,
        })
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Arc<DispatchGateway> {
        &self.gateway
    }

    // -- Listener lifecycle --------------------------------------------------

    /// Attach the application-layer listener and open the gate.
    ///
    /// Returns the stream the application must drain; until this is called
    /// (and after `detach_listener`) every decision resolves to its default
    /// without publishing.
    pub fn attach_listener(&self) -> EventStream {
        self.gateway.attach()
    }

    /// Detach the listener and close the gate.  Idempotent.
    pub fn detach_listener(&self) {
        self.gateway.detach();
    }

    // -- Inbound decision setters --------------------------------------------

    /// Application's answer to a pending URL decision.
    pub fn set_url_handled(&self, handled: bool) {
        self.gateway.set_url_handled(handled);
    }

    /// Application's answer to a pending in-app display decision, in its
    /// numeric wire encoding.
    pub fn set_in_app_show_response(&self, raw: i64) {
        self.gateway.set_in_app_show_response(raw);
    }

    // -- In-app messages -----------------------------------------------------

    /// Engine-side sync callback: replace the mirrored message set.
    pub fn on_messages_synced(&self, messages: Vec<InAppMessage>) {
        self.manager.sync_messages(messages);
    }

    pub fn in_app_messages(&self) -> Vec<InAppMessage> {
        self.manager.messages()
    }

    pub fn inbox_messages(&self) -> Vec<InAppMessage> {
        self.manager.inbox_messages()
    }

    pub fn unread_inbox_count(&self) -> usize {
        self.manager.unread_count()
    }

    pub fn track_in_app_open(&self, message_id: &str, location_raw: i64) {
        self.manager.track_open(message_id, location_raw);
    }

    pub fn track_in_app_click(&self, message_id: &str, location_raw: i64, clicked_url: &str) {
        self.manager.track_click(message_id, location_raw, clicked_url);
    }

    pub fn track_in_app_close(
        &self,
        message_id: &str,
        location_raw: i64,
        source_raw: i64,
        clicked_url: &str,
    ) {
        self.manager
            .track_close(message_id, location_raw, source_raw, clicked_url);
    }

    pub fn consume_in_app(&self, message_id: &str, location_raw: i64, source_raw: i64) {
        self.manager.consume(message_id, location_raw, source_raw);
    }

    pub fn remove_in_app(&self, message_id: &str, location_raw: i64, source_raw: i64) {
        self.manager.remove(message_id, location_raw, source_raw);
    }

    pub fn set_in_app_read(&self, message_id: &str, read: bool) {
        self.manager.set_read(message_id, read);
    }

    pub fn show_in_app(&self, message_id: &str, consume: bool) -> Option<String> {
        self.manager.show_message(message_id, consume)
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

/// Load a persisted config from `data_dir`, if one exists and parses.
pub fn load_config(data_dir: &Path) -> Option<BridgeConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

/// Persist `config` to `data_dir`.
pub fn persist_config(data_dir: &Path, config: &BridgeConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    use kurier_core::types::{Action, ActionContext, ActionSource, InAppShowResponse};

    use crate::engine::StubEngine;

    fn config_with_handlers(url: bool, custom_action: bool, in_app: bool) -> BridgeConfig {
        BridgeConfig {
            url_handler_present: url,
            custom_action_handler_present: custom_action,
            in_app_handler_present: in_app,
            ..BridgeConfig::default()
        }
    }

    fn push_context() -> ActionContext {
        ActionContext {
            action: Action::of_type("openUrl"),
            source: ActionSource::Push,
        }
    }

    #[test]
    fn initialize_registers_only_declared_handlers() {
        let engine = Arc::new(StubEngine::new());
        Sdk::initialize("key", config_with_handlers(true, false, true), Arc::clone(&engine))
            .expect("initialize");

        let delegates = engine.delegates();
        assert!(delegates.url.is_some());
        assert!(delegates.custom_action.is_none());
        assert!(delegates.in_app.is_some());
    }

    #[test]
    fn initialize_without_handlers_registers_none() {
        let engine = Arc::new(StubEngine::new());
        Sdk::initialize("key", config_with_handlers(false, false, false), Arc::clone(&engine))
            .expect("initialize");
        assert!(engine.delegates().is_empty());
    }

    #[test]
    fn url_decision_round_trips_through_the_listener() {
        let engine = Arc::new(StubEngine::new());
        let sdk = Sdk::initialize("key", config_with_handlers(true, false, false), Arc::clone(&engine))
            .expect("initialize");

        let mut stream = sdk.attach_listener();
        let url_delegate = engine.delegates().url.expect("url delegate registered");

        // The engine asks on its own thread, exactly as in production.
        let engine_thread =
            thread::spawn(move || url_delegate.handle_url("https://example.com/offer", &push_context()));

        let event = stream.blocking_recv().expect("decision event published");
        assert_eq!(event.name(), "url-decision-requested");

        sdk.set_url_handled(true);
        assert!(engine_thread.join().expect("engine thread"));
    }

    #[test]
    fn detached_listener_yields_defaults_without_publishing() {
        let engine = Arc::new(StubEngine::new());
        let sdk = Sdk::initialize("key", config_with_handlers(true, false, true), Arc::clone(&engine))
            .expect("initialize");

        let mut stream = sdk.attach_listener();
        sdk.detach_listener();

        let delegates = engine.delegates();
        let handled = delegates
            .url
            .expect("url delegate")
            .handle_url("https://example.com", &push_context());
        assert!(!handled);

        let response = delegates
            .in_app
            .expect("in-app delegate")
            .on_new_message(&InAppMessage::new("m1", 1));
        assert_eq!(response, InAppShowResponse::Show);

        assert!(stream.try_recv().is_none());
    }

    #[test]
    fn gateway_timeout_follows_the_config() {
        let engine = Arc::new(StubEngine::new());
        let config = BridgeConfig {
            decision_timeout_ms: 250,
            ..config_with_handlers(true, false, false)
        };
        let sdk = Sdk::initialize("key", config, engine).expect("initialize");
        assert_eq!(sdk.gateway().timeout(), Duration::from_millis(250));
    }

    #[test]
    fn in_app_sync_flows_through_to_queries() {
        let engine = Arc::new(StubEngine::new());
        let sdk = Sdk::initialize("key", BridgeConfig::default(), engine).expect("initialize");

        sdk.on_messages_synced(vec![
            InAppMessage {
                save_to_inbox: true,
                ..InAppMessage::new("a", 1)
            },
            InAppMessage::new("b", 2),
        ]);

        assert_eq!(sdk.in_app_messages().len(), 2);
        assert_eq!(sdk.inbox_messages().len(), 1);
        assert_eq!(sdk.unread_inbox_count(), 1);

        sdk.set_in_app_read("a", true);
        assert_eq!(sdk.unread_inbox_count(), 0);
    }

    #[test]
    fn config_persistence_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_config(dir.path()).is_none());

        let config = BridgeConfig {
            push_integration_name: Some("my-app".into()),
            decision_timeout_ms: 1500,
            ..BridgeConfig::default()
        };
        persist_config(dir.path(), &config).expect("persist");

        let loaded = load_config(dir.path()).expect("load");
        assert_eq!(loaded.push_integration_name.as_deref(), Some("my-app"));
        assert_eq!(loaded.decision_timeout_ms, 1500);
    }
}
