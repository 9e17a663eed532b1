//! Local HTTP bridge library.
//!
//! Accepts JSON-described HTTP requests on `POST /bridge`, performs them, and
//! returns the target's status and body as JSON.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod relay;

pub use config::schema::BridgeConfig;
pub use http::BridgeServer;
pub use lifecycle::Shutdown;
