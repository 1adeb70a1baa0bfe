// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory print server for pool and cache tests.

use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;

use printbridge_core::error::{PrintBridgeError, Result};

use crate::session::{Connector, ModMarker, PpdResponse, PrinterAttributes, ServerSession};

#[derive(Default)]
pub struct Counters {
    pub connects: AtomicUsize,
    pub reconnects: AtomicUsize,
    pub ppd_fetches: AtomicUsize,
    /// Sessions currently alive (connected and not yet dropped).
    pub live: AtomicUsize,
    /// Fail this many upcoming requests with a transport error.
    pub fail_requests: AtomicUsize,
    /// Fail this many upcoming connects.
    pub fail_connects: AtomicUsize,
    /// Hang this many upcoming PPD fetches before they answer.
    pub stall_requests: AtomicUsize,
}

pub struct FakeServer {
    pub counters: Counters,
    ppds: Mutex<HashMap<String, (String, ModMarker)>>,
    spool: TempDir,
}

fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            counters: Counters::default(),
            ppds: Mutex::new(HashMap::new()),
            spool: tempfile::tempdir().unwrap(),
        })
    }

    /// Publish (or replace) a printer's PPD under a new modification marker.
    pub fn set_ppd(&self, printer: &str, text: &str, marker: &str) {
        self.ppds
            .lock()
            .unwrap()
            .insert(printer.to_owned(), (text.to_owned(), ModMarker(marker.to_owned())));
    }

    pub fn spool_files(&self) -> usize {
        std::fs::read_dir(self.spool.path()).unwrap().count()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
pub struct FakeConnector(pub Arc<FakeServer>);

impl Connector for FakeConnector {
    type Session = FakeSession;

    async fn connect(&self) -> Result<FakeSession> {
        let counters = &self.0.counters;
        counters.connects.fetch_add(1, Ordering::SeqCst);
        if take_one(&counters.fail_connects) {
            return Err(PrintBridgeError::Connect {
                server: "fake".into(),
                reason: "scripted refusal".into(),
            });
        }
        counters.live.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession(Arc::clone(&self.0)))
    }
}

pub struct FakeSession(Arc<FakeServer>);

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.0.counters.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FakeSession {
    fn scripted_failure(&self) -> Result<()> {
        if take_one(&self.0.counters.fail_requests) {
            return Err(PrintBridgeError::Transport("scripted failure".into()));
        }
        Ok(())
    }
}

impl ServerSession for FakeSession {
    async fn get_ppd(&mut self, printer: &str, marker: Option<&ModMarker>) -> Result<PpdResponse> {
        self.0.counters.ppd_fetches.fetch_add(1, Ordering::SeqCst);
        if take_one(&self.0.counters.stall_requests) {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }
        self.scripted_failure()?;

        let Some((text, current)) = self.0.ppds.lock().unwrap().get(printer).cloned() else {
            return Err(PrintBridgeError::HttpStatus {
                operation: "Get-PPD".into(),
                code: 404,
            });
        };
        if marker == Some(&current) {
            return Ok(PpdResponse::NotModified);
        }

        let mut file = tempfile::NamedTempFile::new_in(self.0.spool.path())?;
        file.write_all(text.as_bytes())?;
        let path = file.into_temp_path().keep().map_err(|e| e.error)?;
        Ok(PpdResponse::Modified {
            path,
            marker: Some(current),
        })
    }

    async fn list_printers(&mut self) -> Result<Vec<PrinterAttributes>> {
        self.scripted_failure()?;
        let mut names: Vec<_> = self.0.ppds.lock().unwrap().keys().cloned().collect();
        names.sort();
        Ok(names
            .into_iter()
            .map(|name| PrinterAttributes::from([("printer-name".to_owned(), name)]))
            .collect())
    }

    async fn get_printer_attributes(&mut self, printer: &str) -> Result<PrinterAttributes> {
        self.scripted_failure()?;
        if !self.0.ppds.lock().unwrap().contains_key(printer) {
            return Err(PrintBridgeError::IppStatus {
                operation: "Get-Printer-Attributes".into(),
                status: "ClientErrorNotFound".into(),
            });
        }
        Ok(PrinterAttributes::from([
            ("printer-name".to_owned(), printer.to_owned()),
            ("printer-state".to_owned(), "3".to_owned()),
        ]))
    }

    async fn reconnect(&mut self) -> Result<()> {
        self.0.counters.reconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
