// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PrintBridge CUPS side: a pooled connection to the print server, a
// per-printer PPD cache, and the capability pipeline built on both.

pub mod cache;
pub mod capabilities;
pub mod cups;
pub mod http;
pub mod pool;
pub mod session;

#[cfg(test)]
mod fake;

pub use cache::{CachedPpd, PpdCache};
pub use capabilities::{PrinterCapabilities, connect_cups};
pub use cups::{CupsConnector, CupsSession};
pub use pool::{ConnectionPool, PooledConnection, SessionFuture};
pub use session::{Connector, ModMarker, PpdResponse, PrinterAttributes, ServerSession};
