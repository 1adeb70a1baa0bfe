// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability pipeline entry point used by the printer sync loop.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use printbridge_core::cdd::{CloudDeviceDescription, PrinterDescriptionSection};
use printbridge_core::error::Result;
use printbridge_core::ConnectorConfig;

use crate::cache::PpdCache;
use crate::cups::CupsConnector;
use crate::pool::ConnectionPool;
use crate::session::Connector;

/// What the sync loop needs to describe one printer to the cloud service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrinterCapabilities {
    pub description: PrinterDescriptionSection,
    /// Empty when the PPD does not name one.
    pub manufacturer: String,
    /// Empty when the PPD does not name one.
    pub model: String,
    /// SHA-256 of the PPD the description was translated from.
    pub ppd_hash: String,
}

impl PrinterCapabilities {
    /// Wrap the description in the versioned CDD envelope.
    pub fn to_cdd(&self) -> CloudDeviceDescription {
        CloudDeviceDescription::new(self.description.clone())
    }
}

impl<C: Connector> PpdCache<C> {
    /// Refresh the PPD for `printer` and return its translated capabilities.
    ///
    /// Translation happens only when the PPD content changed; an unchanged
    /// PPD returns the stored translation.
    #[instrument(skip(self))]
    pub async fn get_capabilities(&self, printer: &str) -> Result<PrinterCapabilities> {
        let cached = self.refresh(printer).await?;
        let translation = Arc::clone(&cached.translation);
        debug!(
            manufacturer = %translation.manufacturer,
            model = %translation.model,
            "capabilities ready"
        );
        Ok(PrinterCapabilities {
            description: translation.description.clone(),
            manufacturer: translation.manufacturer.clone(),
            model: translation.model.clone(),
            ppd_hash: cached.hash,
        })
    }
}

/// Build the CUPS-backed cache from configuration.
pub fn connect_cups(config: &ConnectorConfig) -> Result<PpdCache<CupsConnector>> {
    let connector = CupsConnector::new(config)?;
    let pool = ConnectionPool::new(connector, config)?;
    PpdCache::new(Arc::new(pool), &config.ppd_cache_dir)
}
