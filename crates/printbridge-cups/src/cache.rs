// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-printer PPD cache with conditional refresh.
//
// Each printer owns one stable file in the cache directory.  A refresh asks
// the server for the PPD conditional on the last modification marker; fresh
// bytes are streamed through SHA-256 into a staging file that then replaces
// the stable file in one rename, so readers never see a half-written PPD.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use sha2::{Digest, Sha256};
use tempfile::{NamedTempFile, TempPath};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use printbridge_core::error::{PrintBridgeError, Result};
use printbridge_ppd::{PpdTranslation, translate_ppd};

use crate::pool::ConnectionPool;
use crate::session::{Connector, ModMarker, PpdResponse};

/// A consistent view of one cached PPD.
#[derive(Debug, Clone)]
pub struct CachedPpd {
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the PPD bytes.
    pub hash: String,
    pub translation: Arc<PpdTranslation>,
}

struct PpdCacheEntry {
    printer_name: String,
    /// Deleted when the entry is dropped.
    stable: TempPath,
    marker: Option<ModMarker>,
    current: Option<(String, Arc<PpdTranslation>)>,
}

impl PpdCacheEntry {
    fn create(cache_dir: &Path, printer: &str) -> io::Result<Self> {
        let stable = tempfile::Builder::new()
            .prefix(&format!("{}-", file_stem(printer)))
            .suffix(".ppd")
            .tempfile_in(cache_dir)?
            .into_temp_path();
        Ok(Self {
            printer_name: printer.to_owned(),
            stable,
            marker: None,
            current: None,
        })
    }

    fn snapshot(&self) -> Option<CachedPpd> {
        let (hash, translation) = self.current.as_ref()?;
        Some(CachedPpd {
            path: self.stable.to_path_buf(),
            hash: hash.clone(),
            translation: Arc::clone(translation),
        })
    }
}

/// Printer names become part of a file name; keep the safe characters.
fn file_stem(printer: &str) -> String {
    printer
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Stream `source` into a staging file in `cache_dir` while hashing it, then
/// rename the staging file over `stable`.  Returns the hash and the text.
fn replace_contents(source: &Path, cache_dir: &Path, stable: &Path) -> io::Result<(String, String)> {
    let mut reader = BufReader::new(File::open(source)?);
    let mut staged = NamedTempFile::new_in(cache_dir)?;
    let mut hasher = Sha256::new();
    let mut contents = Vec::new();
    let mut buf = [0_u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        staged.write_all(&buf[..n])?;
        contents.extend_from_slice(&buf[..n]);
    }
    staged.as_file().sync_all()?;
    staged.persist(stable).map_err(|e| e.error)?;

    // PPDs are nominally ASCII but Latin-1 translations turn up.
    let text = String::from_utf8_lossy(&contents).into_owned();
    Ok((hex::encode(hasher.finalize()), text))
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PrintBridgeError::Io(io::Error::other(e)))
}

pub struct PpdCache<C: Connector> {
    pool: Arc<ConnectionPool<C>>,
    cache_dir: PathBuf,
    entries: RwLock<HashMap<String, Arc<Mutex<PpdCacheEntry>>>>,
}

impl<C: Connector> PpdCache<C> {
    pub fn new(pool: Arc<ConnectionPool<C>>, cache_dir: impl Into<PathBuf>) -> Result<Self> {
        let cache_dir = cache_dir.into();
        std::fs::create_dir_all(&cache_dir)?;
        Ok(Self {
            pool,
            cache_dir,
            entries: RwLock::new(HashMap::new()),
        })
    }

    pub fn pool(&self) -> &Arc<ConnectionPool<C>> {
        &self.pool
    }

    fn existing(&self, printer: &str) -> Option<Arc<Mutex<PpdCacheEntry>>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(printer)
            .cloned()
    }

    /// The entry for `printer`, created on first use.  Racing creators all
    /// end up with the same entry.
    fn entry(&self, printer: &str) -> Result<Arc<Mutex<PpdCacheEntry>>> {
        if let Some(entry) = self.existing(printer) {
            return Ok(entry);
        }

        let candidate = PpdCacheEntry::create(&self.cache_dir, printer)?;
        let (entry, loser) = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            match entries.get(printer) {
                Some(existing) => (Arc::clone(existing), Some(candidate)),
                None => {
                    let entry = Arc::new(Mutex::new(candidate));
                    entries.insert(printer.to_owned(), Arc::clone(&entry));
                    (entry, None)
                }
            }
        };
        if let Some(loser) = loser {
            debug!(printer, "lost entry creation race, discarding candidate");
            tokio::task::spawn_blocking(move || drop(loser));
        }
        Ok(entry)
    }

    /// Bring the cached PPD for `printer` up to date and return it.
    ///
    /// On failure the entry keeps its last good file, hash, and marker.  An
    /// entry that never held a PPD is discarded along with its file.
    #[instrument(skip(self))]
    pub async fn refresh(&self, printer: &str) -> Result<CachedPpd> {
        loop {
            let handle = self.entry(printer)?;
            let mut entry = handle.lock().await;
            if !self.is_listed(printer, &handle) {
                // Discarded while we waited for it.
                continue;
            }

            let result = self.refresh_locked(printer, &mut entry).await;
            if result.is_err() && entry.current.is_none() {
                self.unlist(printer, &handle);
                drop(entry);
                if let Err(e) = blocking(move || drop(handle)).await {
                    warn!(error = %e, "deleting empty cache entry failed");
                }
                debug!("discarded cache entry after failed first fetch");
            }
            return result;
        }
    }

    fn is_listed(&self, printer: &str, handle: &Arc<Mutex<PpdCacheEntry>>) -> bool {
        self.existing(printer)
            .is_some_and(|listed| Arc::ptr_eq(&listed, handle))
    }

    fn unlist(&self, printer: &str, handle: &Arc<Mutex<PpdCacheEntry>>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.get(printer).is_some_and(|listed| Arc::ptr_eq(listed, handle)) {
            entries.remove(printer);
        }
    }

    async fn refresh_locked(&self, printer: &str, entry: &mut PpdCacheEntry) -> Result<CachedPpd> {
        let response = self.pool.get_ppd(printer, entry.marker.as_ref()).await?;
        match response {
            PpdResponse::NotModified => {
                debug!("PPD not modified");
                entry
                    .snapshot()
                    .ok_or_else(|| PrintBridgeError::PpdNotCached(printer.to_owned()))
            }
            PpdResponse::Modified { path, marker } => {
                let cache_dir = self.cache_dir.clone();
                let stable = entry.stable.to_path_buf();
                let outcome = blocking(move || {
                    let outcome = replace_contents(&path, &cache_dir, &stable)
                        .map(|(hash, text)| (hash, Arc::new(translate_ppd(&text))));
                    if let Err(e) = std::fs::remove_file(&path) {
                        warn!(path = %path.display(), error = %e, "could not remove downloaded PPD");
                    }
                    outcome
                })
                .await??;

                info!(printer = %entry.printer_name, hash = %outcome.0, "PPD updated");
                entry.marker = marker;
                entry.current = Some(outcome);
                entry
                    .snapshot()
                    .ok_or_else(|| PrintBridgeError::PpdNotCached(printer.to_owned()))
            }
        }
    }

    /// The cached PPD for `printer` without contacting the server.
    pub async fn cached(&self, printer: &str) -> Option<CachedPpd> {
        let entry = self.existing(printer)?;
        let entry = entry.lock().await;
        entry.snapshot()
    }

    /// Drop the entry for `printer` and delete its file.  Returns whether an
    /// entry existed.
    #[instrument(skip(self))]
    pub async fn invalidate(&self, printer: &str) -> bool {
        let removed = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(printer);
        let Some(entry) = removed else {
            return false;
        };
        // Wait out an in-flight refresh so the file goes away with the entry.
        let entry = entry.lock_owned().await;
        if let Err(e) = blocking(move || drop(entry)).await {
            warn!(error = %e, "deleting cached PPD failed");
        }
        debug!("cache entry removed");
        true
    }

    /// Drop every entry and close the pool.
    pub async fn shutdown(&self) {
        let entries: Vec<_> = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .map(|(_, entry)| entry)
            .collect();
        info!(count = entries.len(), "shutting down PPD cache");
        if let Err(e) = blocking(move || drop(entries)).await {
            warn!(error = %e, "deleting cached PPDs failed");
        }
        self.pool.close();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
