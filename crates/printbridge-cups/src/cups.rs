// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Live CUPS session.
//
// PPDs are fetched over a persistent HTTP/1.1 connection to the scheduler;
// generic IPP operations (CUPS-Get-Printers, Get-Printer-Attributes) go
// through the `ipp` crate's async client against the same server.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ipp::prelude::*;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, error, instrument, warn};

use printbridge_core::ConnectorConfig;
use printbridge_core::error::{PrintBridgeError, Result};

use crate::http;
use crate::session::{Connector, ModMarker, PpdResponse, PrinterAttributes, ServerSession};

const GET_PPD: &str = "Get-PPD";
const CUPS_GET_PRINTERS: &str = "CUPS-Get-Printers";
const GET_PRINTER_ATTRIBUTES: &str = "Get-Printer-Attributes";

/// Where and how to reach the CUPS scheduler.
#[derive(Debug, Clone)]
pub struct CupsConnector {
    host: String,
    port: u16,
    timeout: Duration,
    /// Directory for downloaded PPDs before the cache claims them.
    spool_dir: PathBuf,
}

impl CupsConnector {
    pub fn new(config: &ConnectorConfig) -> Result<Self> {
        config.validate()?;
        let spool_dir = config.ppd_cache_dir.join("spool");
        std::fs::create_dir_all(&spool_dir)?;
        Ok(Self {
            host: config.server_host.clone(),
            port: config.server_port,
            timeout: config.connect_timeout(),
            spool_dir,
        })
    }
}

impl Connector for CupsConnector {
    type Session = CupsSession;

    async fn connect(&self) -> Result<CupsSession> {
        let mut session = CupsSession {
            host: self.host.clone(),
            port: self.port,
            timeout: self.timeout,
            spool_dir: self.spool_dir.clone(),
            stream: None,
        };
        session.stream = Some(session.dial().await?);
        Ok(session)
    }
}

/// One keep-alive connection to the scheduler.
///
/// The stream is taken out for the length of a PPD exchange and only put
/// back once the response has been read in full, so a failed or abandoned
/// exchange leaves `stream` empty and the next request reconnects.
///
/// Only PPD downloads travel over `stream`.  IPP operations open their own
/// HTTP connection through `AsyncIppClient` for each call; the pool bounds
/// how many run at once but does not reuse their connections.
pub struct CupsSession {
    host: String,
    port: u16,
    timeout: Duration,
    spool_dir: PathBuf,
    stream: Option<BufReader<TcpStream>>,
}

impl CupsSession {
    fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn dial(&self) -> Result<BufReader<TcpStream>> {
        let addr = self.authority();
        debug!(addr = %addr, "connecting to CUPS");
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| PrintBridgeError::Timeout(self.timeout))?
            .map_err(|e| PrintBridgeError::Connect {
                server: addr.clone(),
                reason: e.to_string(),
            })?;
        stream.set_nodelay(true)?;
        Ok(BufReader::new(stream))
    }

    fn ipp_uri(&self, path: &str) -> Result<Uri> {
        let uri = format!("ipp://{}{path}", self.authority());
        uri.parse()
            .map_err(|e| PrintBridgeError::Protocol(format!("invalid IPP URI '{uri}': {e}")))
    }

    /// Await one IPP exchange under the session timeout and check its
    /// status.  `NOT_FOUND` comes back as `None` when `not_found_ok` is set.
    async fn send_ipp<F, E>(
        &self,
        name: &'static str,
        exchange: F,
        not_found_ok: bool,
    ) -> Result<Option<IppRequestResponse>>
    where
        F: Future<Output = std::result::Result<IppRequestResponse, E>>,
        E: fmt::Display,
    {
        let response = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| PrintBridgeError::Timeout(self.timeout))?
            .map_err(|e| PrintBridgeError::Transport(format!("{name}: {e}")))?;

        let code = response.header().status_code();
        if code.is_success() {
            return Ok(Some(response));
        }
        if not_found_ok && code == StatusCode::ClientErrorNotFound {
            return Ok(None);
        }
        error!(operation = name, status = ?code, "IPP request failed");
        Err(PrintBridgeError::IppStatus {
            operation: name.into(),
            status: format!("{code:?}"),
        })
    }

    async fn fetch_ppd(&mut self, printer: &str, marker: Option<&ModMarker>) -> Result<PpdResponse> {
        let path = format!("/printers/{}.ppd", http::encode_path_segment(printer));
        let request = http::get_request(&path, &self.authority(), marker.map(|m| m.0.as_str()));
        let mut stream = match self.stream.take() {
            Some(stream) => stream,
            None => self.dial().await?,
        };

        let exchange = exchange_ppd(&mut stream, &request, &self.spool_dir, printer);
        let (response, keep_alive) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| PrintBridgeError::Timeout(self.timeout))??;
        if keep_alive {
            self.stream = Some(stream);
        }
        Ok(response)
    }
}

/// One GET for a PPD, read to the end of the response.  The flag says
/// whether the connection may carry another request.
async fn exchange_ppd(
    stream: &mut BufReader<TcpStream>,
    request: &str,
    spool_dir: &Path,
    printer: &str,
) -> Result<(PpdResponse, bool)> {
    stream.get_mut().write_all(request.as_bytes()).await?;
    stream.get_mut().flush().await?;
    let head = http::read_response_head(stream).await?;
    let keep_alive = head.keep_alive();

    match head.status {
        304 => {
            http::drain_body(stream, &head).await?;
            Ok((PpdResponse::NotModified, keep_alive))
        }
        200 => {
            let download = tempfile::Builder::new()
                .prefix("ppd-download-")
                .suffix(".ppd")
                .tempfile_in(spool_dir)?;
            let (file, temp_path) = download.into_parts();
            let mut file = tokio::fs::File::from_std(file);
            let bytes = http::copy_body(stream, &head, &mut file).await?;
            file.sync_all().await?;
            drop(file);

            // Until here an abandoned download deletes itself.
            let path = temp_path
                .keep()
                .map_err(|e| PrintBridgeError::Io(e.error))?;
            let marker = head.header("last-modified").map(|v| ModMarker(v.to_owned()));
            debug!(printer, bytes, "downloaded PPD");
            Ok((PpdResponse::Modified { path, marker }, keep_alive))
        }
        code => {
            http::drain_body(stream, &head).await?;
            Err(PrintBridgeError::HttpStatus {
                operation: GET_PPD.into(),
                code,
            })
        }
    }
}

impl ServerSession for CupsSession {
    #[instrument(skip(self, marker), fields(server = %self.authority()))]
    async fn get_ppd(&mut self, printer: &str, marker: Option<&ModMarker>) -> Result<PpdResponse> {
        self.fetch_ppd(printer, marker).await.inspect_err(|e| {
            if e.is_transport() || matches!(e, PrintBridgeError::Io(_)) {
                warn!(printer, error = %e, "dropped CUPS connection after failed PPD fetch");
            }
        })
    }

    #[instrument(skip(self), fields(server = %self.authority()))]
    async fn list_printers(&mut self) -> Result<Vec<PrinterAttributes>> {
        let uri = self.ipp_uri("/")?;
        let operation = IppOperationBuilder::cups().get_printers();
        let client = AsyncIppClient::new(uri);
        let Some(response) = self.send_ipp(CUPS_GET_PRINTERS, client.send(operation), true).await? else {
            debug!("server has no printers");
            return Ok(Vec::new());
        };

        let printers: Vec<_> = response
            .attributes()
            .groups_of(DelimiterTag::PrinterAttributes)
            .map(flatten_group)
            .collect();
        debug!(count = printers.len(), "listed printers");
        Ok(printers)
    }

    #[instrument(skip(self), fields(server = %self.authority()))]
    async fn get_printer_attributes(&mut self, printer: &str) -> Result<PrinterAttributes> {
        let uri = self.ipp_uri(&format!("/printers/{}", http::encode_path_segment(printer)))?;
        let operation = IppOperationBuilder::get_printer_attributes(uri.clone()).build();
        let client = AsyncIppClient::new(uri);
        let response = self
            .send_ipp(GET_PRINTER_ATTRIBUTES, client.send(operation), false)
            .await?
            .ok_or_else(|| PrintBridgeError::Protocol("empty Get-Printer-Attributes response".into()))?;

        let mut attrs = HashMap::new();
        for group in response.attributes().groups() {
            attrs.extend(flatten_group(group));
        }
        debug!(count = attrs.len(), "received printer attributes");
        Ok(attrs)
    }

    async fn reconnect(&mut self) -> Result<()> {
        self.stream = None;
        self.stream = Some(self.dial().await?);
        Ok(())
    }
}

/// Flatten one attribute group to name and display string.
fn flatten_group(group: &IppAttributeGroup) -> PrinterAttributes {
    group
        .attributes()
        .iter()
        .map(|(name, attr)| (name.clone(), attr.value().to_string()))
        .collect()
}
