// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Core domain types for the Kurier messaging bridge.
//
// Several enums cross the native boundary as small integers.  Each of those
// carries a `from_raw` constructor that returns `Option<Self>`: an
// unrecognized value decodes to `None` and the caller falls back to the
// plain (non-enriched) variant of the operation instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three independently bridged decision points.
///
/// Used for logging and for naming the per-kind default decision; the typed
/// decision values themselves are carried by the delegate trait signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// "Should this deep link / URL be handled by the application layer?"
    UrlHandling,
    /// "Should this custom action be handled?"
    CustomAction,
    /// "How should this in-app message be displayed?"
    InAppDisplay,
}

impl DecisionKind {
    /// Stable name used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            DecisionKind::UrlHandling => "url-handling",
            DecisionKind::CustomAction => "custom-action",
            DecisionKind::InAppDisplay => "in-app-display",
        }
    }
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Where an action originated inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionSource {
    /// Tapping a push notification or a push action button.
    Push,
    /// Opening a universal / app link.
    AppLink,
    /// Tapping a link or button inside an in-app message.
    InApp,
}

impl ActionSource {
    /// Decode the engine's numeric encoding.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(ActionSource::Push),
            1 => Some(ActionSource::AppLink),
            2 => Some(ActionSource::InApp),
            _ => None,
        }
    }
}

/// An action attached to a push notification or in-app button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Action type, e.g. `openUrl` or a custom `action://` scheme name.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Opaque payload attached by the campaign author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Text the user typed into a push input field, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
}

impl Action {
    /// Convenience constructor for an action with no payload.
    pub fn of_type(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            data: None,
            user_input: None,
        }
    }
}

/// The context an action fired in: the action itself plus its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionContext {
    pub action: Action,
    pub source: ActionSource,
}

/// The application layer's answer to "how should this in-app be displayed?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InAppShowResponse {
    /// Display the message immediately.
    Show,
    /// Skip this message.
    Skip,
}

impl InAppShowResponse {
    /// Decode the wire encoding (0 = show, 1 = skip).
    ///
    /// Returns `None` for out-of-range values; the setter treats that as
    /// "show" so an application-layer bug can never suppress a message.
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(InAppShowResponse::Show),
            1 => Some(InAppShowResponse::Skip),
            _ => None,
        }
    }
}

/// Where a message-targeted operation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InAppLocation {
    /// The message was displayed as a full in-app overlay.
    InApp,
    /// The message was viewed from the inbox list.
    Inbox,
}

impl InAppLocation {
    /// Decode the wire encoding.  Unknown values fall back to `InApp`,
    /// matching the engine's own lenient location decoding.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            1 => InAppLocation::Inbox,
            _ => InAppLocation::InApp,
        }
    }
}

/// How an in-app message was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InAppCloseSource {
    /// The back / close affordance.
    Back,
    /// A link inside the message.
    Link,
}

impl InAppCloseSource {
    /// Decode the wire encoding; `None` means "use the non-sourced variant".
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(InAppCloseSource::Back),
            1 => Some(InAppCloseSource::Link),
            _ => None,
        }
    }
}

/// Why an in-app message was deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InAppDeleteSource {
    /// Swiped away in the inbox list.
    InboxSwipe,
    /// An explicit delete button.
    DeleteButton,
}

impl InAppDeleteSource {
    /// Decode the wire encoding; `None` means "use the non-sourced variant".
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(InAppDeleteSource::InboxSwipe),
            1 => Some(InAppDeleteSource::DeleteButton),
            _ => None,
        }
    }
}

/// Inbox presentation metadata for a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Descriptor for an in-app message, as delivered by the engine.
///
/// This is metadata only — the rendered content lives inside the engine and
/// is referenced by `message_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InAppMessage {
    /// Engine-assigned message identifier.
    pub message_id: String,
    /// Campaign this message belongs to.
    pub campaign_id: i64,
    /// When the campaign created the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the message expires and stops being shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the message should also appear in the inbox.
    #[serde(default)]
    pub save_to_inbox: bool,
    /// Whether the user has read the message (inbox messages only).
    #[serde(default)]
    pub read: bool,
    /// Inbox row presentation metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbox_metadata: Option<InboxMetadata>,
    /// Arbitrary campaign payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_payload: Option<Value>,
}

impl InAppMessage {
    /// Minimal descriptor with just the identifiers set.
    pub fn new(message_id: impl Into<String>, campaign_id: i64) -> Self {
        Self {
            message_id: message_id.into(),
            campaign_id,
            created_at: None,
            expires_at: None,
            save_to_inbox: false,
            read: false,
            inbox_metadata: None,
            custom_payload: None,
        }
    }
}
