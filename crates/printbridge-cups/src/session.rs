// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print server session abstraction.
//
// The pool and cache only see these two traits, so they run unchanged
// against a live CUPS server or an in-memory test double.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use printbridge_core::error::Result;

/// Opaque modification marker handed out by the print server with a PPD
/// (for CUPS, the `Last-Modified` header) and echoed back on the next
/// conditional fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModMarker(pub String);

impl fmt::Display for ModMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a conditional PPD fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PpdResponse {
    /// The server confirmed the PPD is unchanged since `marker`.
    NotModified,
    /// Fresh PPD bytes were written to `path`, a server-side temporary file
    /// the caller now owns and must delete.
    Modified {
        path: PathBuf,
        marker: Option<ModMarker>,
    },
}

/// Flattened IPP attributes: attribute name to display string.
pub type PrinterAttributes = HashMap<String, String>;

/// One open session with the print server.
///
/// A session is used by exactly one request at a time; the pool hands it out
/// as `&mut` for the whole request.
pub trait ServerSession: Send + 'static {
    /// Fetch the PPD for `printer`, conditional on `marker` when given.
    fn get_ppd(
        &mut self,
        printer: &str,
        marker: Option<&ModMarker>,
    ) -> impl Future<Output = Result<PpdResponse>> + Send;

    /// CUPS-Get-Printers.  One attribute map per printer; an empty list when
    /// the server has no printers.
    fn list_printers(&mut self) -> impl Future<Output = Result<Vec<PrinterAttributes>>> + Send;

    /// Get-Printer-Attributes for one printer.
    fn get_printer_attributes(
        &mut self,
        printer: &str,
    ) -> impl Future<Output = Result<PrinterAttributes>> + Send;

    /// Drop the underlying connection and open a new one.
    fn reconnect(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Opens new sessions for the pool.
pub trait Connector: Send + Sync + 'static {
    type Session: ServerSession;

    fn connect(&self) -> impl Future<Output = Result<Self::Session>> + Send;
}
