// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Unified error types for Kurier.

use thiserror::Error;

/// Top-level error type for all Kurier operations.
///
/// None of the engine-facing decision points ever surface these errors to
/// the engine — they resolve to a default decision instead.  The error type
/// exists for the configuration, lifecycle, and engine-boundary paths.
#[derive(Debug, Error)]
pub enum KurierError {
    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Engine boundary --
    #[error("engine error: {0}")]
    Engine(String),

    // -- Bridge coordination --
    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("message not found: {0}")]
    MessageNotFound(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KurierError>;
