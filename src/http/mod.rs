//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one task each)
//!     → server.rs (Axum router, request ID, trace span)
//!     → request.rs (read envelope body per Content-Length)
//!     → relay subsystem (decode, validate, outbound call)
//!     → response.rs (JSON 200 or bare status code)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{build_router, AppState, BridgeServer, BRIDGE_PATH};
