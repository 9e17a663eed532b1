//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! startup
//!     → listener.rs (bind loopback address, fatal on failure)
//!     → axum::serve (one task per accepted connection)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - No connection limit by default; optional in-flight cap waits, never rejects
//! - Plain HTTP only; the bridge is loopback-local

pub mod listener;

pub use listener::{bind, InFlightLimit, ListenerError};
