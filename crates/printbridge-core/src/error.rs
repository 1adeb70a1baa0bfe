// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for PrintBridge.

use thiserror::Error;

/// Top-level error type for all PrintBridge operations.
#[derive(Debug, Error)]
pub enum PrintBridgeError {
    // -- Transport errors (retried once by the pool) --
    #[error("failed to connect to print server {server}: {reason}")]
    Connect { server: String, reason: String },

    #[error("print server transport failure: {0}")]
    Transport(String),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),

    // -- Protocol errors (server answered, but with a failure) --
    #[error("{operation} returned IPP status {status}")]
    IppStatus { operation: String, status: String },

    #[error("{operation} returned HTTP status {code}")]
    HttpStatus { operation: String, code: u16 },

    #[error("malformed print server response: {0}")]
    Protocol(String),

    // -- Cache / pool state --
    #[error("print server reported no change, but no PPD is cached for {0}")]
    PpdNotCached(String),

    #[error("connection pool is closed")]
    PoolClosed,

    // -- Resources and configuration --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl PrintBridgeError {
    /// Whether this error means the underlying session can no longer be
    /// trusted and should be discarded instead of returned to the pool.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Connect { .. } | Self::Transport(_) | Self::Timeout(_) | Self::Protocol(_) => {
                true
            }
            Self::Io(io_err) => matches!(
                io_err.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::UnexpectedEof
            ),
            _ => false,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PrintBridgeError>;
