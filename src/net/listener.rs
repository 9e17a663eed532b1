//! TCP listener binding and in-flight limits.
//!
//! # Responsibilities
//! - Bind the configured loopback address (failure is fatal to startup)
//! - Optionally cap concurrent relays via semaphore

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Address did not parse.
    #[error("Invalid bind address `{address}`: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },
}

/// Bind the configured address.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|source| ListenerError::Address {
            address: config.bind_address.clone(),
            source,
        })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { address: addr, source })?;

    tracing::info!(address = %addr, "Listener bound");
    Ok(listener)
}

/// Optional cap on concurrent relays.
///
/// Requests beyond the cap wait for a slot rather than being rejected, so the
/// cap never changes which status a request receives.
#[derive(Debug, Clone, Default)]
pub struct InFlightLimit {
    semaphore: Option<Arc<Semaphore>>,
}

impl InFlightLimit {
    /// Create a limit; `None` means unbounded.
    pub fn new(max_in_flight: Option<usize>) -> Self {
        Self {
            semaphore: max_in_flight.map(|n| Arc::new(Semaphore::new(n))),
        }
    }

    /// Wait for a slot. The slot is released when the permit drops.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        match &self.semaphore {
            // The semaphore is never closed, so acquisition only fails on a bug.
            Some(semaphore) => semaphore.clone().acquire_owned().await.ok(),
            None => None,
        }
    }
}
