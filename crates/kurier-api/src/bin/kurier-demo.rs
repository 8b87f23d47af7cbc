// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Demo harness: a stub engine asks for a deep-link decision on its own
// thread while the async application layer drains the event stream and
// answers.  Run with RUST_LOG=debug to watch the round trip.

use std::sync::Arc;

use kurier_api::{
    Action, ActionContext, ActionSource, BridgeConfig, BridgeEvent, Sdk, StubEngine,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Kurier demo starting");

    let engine = Arc::new(StubEngine::new());
    let config = BridgeConfig {
        url_handler_present: true,
        in_app_handler_present: true,
        ..BridgeConfig::default()
    };

    let sdk = match Sdk::initialize("demo-api-key", config, Arc::clone(&engine)) {
        Ok(sdk) => sdk,
        Err(e) => {
            tracing::error!(error = %e, "engine refused to configure");
            return;
        }
    };

    let mut stream = sdk.attach_listener();

    // Play the engine's part: ask for a URL decision from a plain thread,
    // the way the native layer would from a push-tap callback.
    let url_delegate = engine.delegates().url.expect("url delegate registered");
    let engine_thread = tokio::task::spawn_blocking(move || {
        let context = ActionContext {
            action: Action::of_type("openUrl"),
            source: ActionSource::Push,
        };
        url_delegate.handle_url("https://example.com/offer", &context)
    });

    // The application layer: drain one event and answer it.
    if let Some(event) = stream.recv().await {
        tracing::info!(event = event.name(), "application layer received decision request");
        if let BridgeEvent::UrlDecisionRequested { url, .. } = &event {
            tracing::info!(%url, "application layer claims this link");
        }
        sdk.set_url_handled(true);
    }

    match engine_thread.await {
        Ok(handled) => tracing::info!(handled, "engine received the decision"),
        Err(e) => tracing::error!(error = %e, "engine thread panicked"),
    }

    sdk.detach_listener();
    tracing::info!("Kurier demo done");
}
