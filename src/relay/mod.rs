//! Relay subsystem.
//!
//! # Data Flow
//! ```text
//! envelope bytes
//!     → envelope.rs (decode JSON, apply defaults, require url)
//!     → client.rs (outbound call with a fixed deadline)
//!     → RelayResponse { status, text }   or   UpstreamError
//! ```
//!
//! # Design Decisions
//! - The target's HTTP status is data, not an error
//! - Transport failures are explicit `Result`s, mapped to 502 by the HTTP layer
//! - No retries; the caller decides whether to try again

pub mod client;
pub mod envelope;
pub mod error;

pub use client::UpstreamClient;
pub use envelope::{RawEnvelope, RelayRequest, RelayResponse};
pub use error::{RelayError, UpstreamError};
