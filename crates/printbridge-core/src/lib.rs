// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PrintBridge: core types, configuration, and error definitions shared
// across all crates.

pub mod cdd;
pub mod config;
pub mod error;

pub use config::ConnectorConfig;
pub use error::PrintBridgeError;
