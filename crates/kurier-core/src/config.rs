// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Bridge configuration.
//
// The application layer assembles this as a plain dictionary and hands it
// across at initialization time, so the JSON field names follow the wire
// convention (camelCase) and every field has a default.  The three
// `*_handler_present` flags tell the gateway whether the corresponding
// decision point is delegated to the application layer at all.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Native log verbosity requested by the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

impl LogLevel {
    /// Decode the wire encoding (1 = debug, 2 = info, 3 = error).
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Initialization-time settings for the bridge and the underlying engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeConfig {
    /// Name of the push integration that delivers notifications to the app.
    pub push_integration_name: Option<String>,
    /// Automatically register / deregister push tokens when the user
    /// identity changes.
    pub auto_push_registration: bool,
    /// Seconds to wait between displaying queued in-app messages.
    pub in_app_display_interval: f64,
    /// URL protocols the engine may hand to the application layer as deep
    /// links.  Links with other protocols are not delegated.
    pub allowed_protocols: Vec<String>,
    /// Native log verbosity.
    pub log_level: LogLevel,
    /// Seconds before JWT expiry at which the engine asks for a fresh token.
    pub expiring_auth_token_refresh_period: f64,
    /// Whether the application layer installed a deep-link handler.
    pub url_handler_present: bool,
    /// Whether the application layer installed a custom-action handler.
    pub custom_action_handler_present: bool,
    /// Whether the application layer installed an in-app display handler.
    pub in_app_handler_present: bool,
    /// Whether the application layer wired a JWT auth callback.
    pub auth_handler_present: bool,
    /// How long a decision point blocks waiting for the application layer
    /// before substituting the default decision, in milliseconds.
    pub decision_timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            push_integration_name: None,
            auto_push_registration: true,
            in_app_display_interval: 30.0,
            allowed_protocols: Vec::new(),
            log_level: LogLevel::Info,
            expiring_auth_token_refresh_period: 60.0,
            url_handler_present: false,
            custom_action_handler_present: false,
            in_app_handler_present: false,
            auth_handler_present: false,
            decision_timeout_ms: 2_000,
        }
    }
}

impl BridgeConfig {
    /// Parse a config dictionary received from the application layer.
    ///
    /// Unknown keys are ignored and missing keys take their defaults, so
    /// older application layers keep working against newer bridges.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize back to the wire dictionary form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The decision timeout as a `Duration`.
    pub fn decision_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.decision_timeout_ms)
    }
}
