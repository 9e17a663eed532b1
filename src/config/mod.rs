//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML, via --config)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → passed by value to the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup and never mutated
//! - All fields have defaults; no file means the fixed loopback bridge
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{BridgeConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig};
pub use validation::ValidationError;
