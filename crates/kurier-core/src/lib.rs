// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Kurier — Core types and error definitions shared across all crates.

pub mod config;
pub mod delegate;
pub mod error;
pub mod types;

pub use config::BridgeConfig;
pub use error::KurierError;
pub use types::*;
