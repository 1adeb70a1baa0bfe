// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Connection pool for print server sessions.
//
// A semaphore caps the number of borrowed sessions.  A returned session is
// parked for a short grace window so that a waiting borrower can pick it up;
// if nobody does, a background reaper closes it.  Each borrow hands out the
// session as `&mut`, so one request owns it from start to finish and gives
// it back on every exit path when the guard drops.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, error, instrument, warn};

use printbridge_core::ConnectorConfig;
use printbridge_core::error::{PrintBridgeError, Result};

use crate::session::{Connector, ModMarker, PpdResponse, PrinterAttributes, ServerSession};

/// A request issued against one borrowed session.
pub type SessionFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

struct Aged<S> {
    session: S,
    connected_at: Instant,
}

/// Parked sessions, newest last.  Tickets let the reaper tell whether the
/// session it is waiting on has already been picked up.
struct IdleSet<S> {
    next_ticket: u64,
    parked: Vec<(u64, Aged<S>)>,
    closed: bool,
}

impl<S> IdleSet<S> {
    fn take(&mut self, ticket: u64) -> Option<Aged<S>> {
        let pos = self.parked.iter().position(|(t, _)| *t == ticket)?;
        Some(self.parked.remove(pos).1)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct ConnectionPool<C: Connector> {
    connector: C,
    gate: Arc<Semaphore>,
    idle: Arc<Mutex<IdleSet<C::Session>>>,
    max_age: Duration,
    connect_timeout: Duration,
    idle_grace: Duration,
}

impl<C: Connector> ConnectionPool<C> {
    pub fn new(connector: C, config: &ConnectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            connector,
            gate: Arc::new(Semaphore::new(config.max_connections)),
            idle: Arc::new(Mutex::new(IdleSet {
                next_ticket: 0,
                parked: Vec::new(),
                closed: false,
            })),
            max_age: config.max_connection_age(),
            connect_timeout: config.connect_timeout(),
            idle_grace: config.idle_grace(),
        })
    }

    /// Borrow a session, waiting while all slots are taken.
    ///
    /// Fails only when the pool is closed or a new session cannot be
    /// established; in the latter case the slot is released again.
    pub async fn acquire(&self) -> Result<PooledConnection<C::Session>> {
        let permit = Arc::clone(&self.gate)
            .acquire_owned()
            .await
            .map_err(|_| PrintBridgeError::PoolClosed)?;

        let parked = lock(&self.idle).parked.pop().map(|(_, aged)| aged);
        let aged = match parked {
            Some(aged) => {
                debug!("reusing parked session");
                aged
            }
            None => {
                let session = tokio::time::timeout(self.connect_timeout, self.connector.connect())
                    .await
                    .map_err(|_| PrintBridgeError::Timeout(self.connect_timeout))??;
                debug!("opened new session");
                Aged {
                    session,
                    connected_at: Instant::now(),
                }
            }
        };

        Ok(PooledConnection {
            conn: Some(aged),
            permit: Some(permit),
            idle: Arc::clone(&self.idle),
            max_age: self.max_age,
            grace: self.idle_grace,
            broken: false,
        })
    }

    /// Issue `request` on a borrowed session, retrying exactly once with a
    /// fresh borrow if the first attempt fails.
    ///
    /// A session is closed rather than parked when its attempt fails with a
    /// transport error or is dropped before it completes.
    pub async fn run<T, F>(&self, operation: &'static str, mut request: F) -> Result<T>
    where
        T: Send,
        F: for<'s> FnMut(&'s mut C::Session) -> SessionFuture<'s, T> + Send,
    {
        match self.attempt(&mut request).await {
            Ok(value) => Ok(value),
            Err(PrintBridgeError::PoolClosed) => Err(PrintBridgeError::PoolClosed),
            Err(first) => {
                warn!(
                    operation,
                    error = %first,
                    transport = first.is_transport(),
                    "request failed, retrying once"
                );
                self.attempt(&mut request).await.inspect_err(|e| {
                    error!(operation, error = %e, "request failed after retry");
                })
            }
        }
    }

    async fn attempt<T, F>(&self, request: &mut F) -> Result<T>
    where
        F: for<'s> FnMut(&'s mut C::Session) -> SessionFuture<'s, T>,
    {
        let mut conn = self.acquire().await?;
        // Until the request completes the session may hold half an exchange;
        // if this future is dropped first, the guard closes it.
        conn.mark_broken();
        let result = match conn.fresh().await {
            Ok(session) => request(session).await,
            Err(e) => Err(e),
        };
        conn.broken = matches!(&result, Err(e) if e.is_transport());
        result
    }

    pub async fn get_ppd(&self, printer: &str, marker: Option<&ModMarker>) -> Result<PpdResponse> {
        let printer = printer.to_owned();
        let marker = marker.cloned();
        self.run("Get-PPD", move |session| {
            let printer = printer.clone();
            let marker = marker.clone();
            Box::pin(async move { session.get_ppd(&printer, marker.as_ref()).await })
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_printers(&self) -> Result<Vec<PrinterAttributes>> {
        self.run("CUPS-Get-Printers", |session| Box::pin(session.list_printers()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_printer_attributes(&self, printer: &str) -> Result<PrinterAttributes> {
        let printer = printer.to_owned();
        self.run("Get-Printer-Attributes", move |session| {
            let printer = printer.clone();
            Box::pin(async move { session.get_printer_attributes(&printer).await })
        })
        .await
    }

    /// Close parked sessions and refuse further borrows.  Sessions still
    /// borrowed are closed when they come back.
    pub fn close(&self) {
        self.gate.close();
        let parked = {
            let mut idle = lock(&self.idle);
            idle.closed = true;
            std::mem::take(&mut idle.parked)
        };
        debug!(count = parked.len(), "pool closed");
    }

    pub fn idle_count(&self) -> usize {
        lock(&self.idle).parked.len()
    }

    pub fn available_permits(&self) -> usize {
        self.gate.available_permits()
    }
}

/// A borrowed session.  Dropping it returns the session to the pool.
pub struct PooledConnection<S: ServerSession> {
    conn: Option<Aged<S>>,
    permit: Option<OwnedSemaphorePermit>,
    idle: Arc<Mutex<IdleSet<S>>>,
    max_age: Duration,
    grace: Duration,
    broken: bool,
}

impl<S: ServerSession> PooledConnection<S> {
    /// The session, reconnected first if it has outlived the maximum age.
    pub async fn fresh(&mut self) -> Result<&mut S> {
        let aged = self.conn.as_mut().ok_or(PrintBridgeError::PoolClosed)?;
        if aged.connected_at.elapsed() >= self.max_age {
            debug!(age = ?aged.connected_at.elapsed(), "reconnecting stale session");
            if let Err(e) = aged.session.reconnect().await {
                self.broken = true;
                return Err(e);
            }
            aged.connected_at = Instant::now();
        }
        Ok(&mut aged.session)
    }

    /// Close the session on return instead of parking it.
    pub fn mark_broken(&mut self) {
        self.broken = true;
    }
}

impl<S: ServerSession> Drop for PooledConnection<S> {
    fn drop(&mut self) {
        let Some(aged) = self.conn.take() else {
            return;
        };
        if self.broken {
            debug!("closing broken session");
            return;
        }

        let ticket = {
            let mut idle = lock(&self.idle);
            if idle.closed {
                return;
            }
            let ticket = idle.next_ticket;
            idle.next_ticket += 1;
            idle.parked.push((ticket, aged));
            ticket
        };
        // Free the slot only once the session is parked, so a woken waiter
        // finds it.
        drop(self.permit.take());

        let idle = Arc::clone(&self.idle);
        match Handle::try_current() {
            Ok(handle) => {
                let grace = self.grace;
                handle.spawn(async move {
                    tokio::time::sleep(grace).await;
                    if lock(&idle).take(ticket).is_some() {
                        debug!("closed idle session after grace window");
                    }
                });
            }
            Err(_) => {
                lock(&idle).take(ticket);
            }
        }
    }
}
