//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create Axum Router exposing exactly `POST /bridge`
//! - Wire up middleware (request ID, tracing)
//! - Serve on the bound listener until shutdown
//! - Decode, validate and relay each envelope
//!
//! # Request outcomes
//! ```text
//! START → route check   → [404]
//!       → body decode   → [400]
//!       → url check     → [400]
//!       → outbound call → [200 + {"status", "text"}] | [502]
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, Uri},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tower_http::{request_id::SetRequestIdLayer, trace::TraceLayer};

use crate::config::BridgeConfig;
use crate::http::request::{make_request_span, read_envelope, MakeRequestUuid};
use crate::lifecycle::ShutdownSignal;
use crate::net::InFlightLimit;
use crate::observability::metrics;
use crate::relay::{RelayError, RelayRequest, RelayResponse, UpstreamClient, UpstreamError};

/// The single route the bridge serves.
pub const BRIDGE_PATH: &str = "/bridge";

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
    pub limit: InFlightLimit,
    /// Envelope read limit; `usize::MAX` when uncapped.
    pub max_body_size: usize,
}

impl AppState {
    /// Build handler state from configuration.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            client: UpstreamClient::new(&config.upstream)?,
            limit: InFlightLimit::new(config.listener.max_in_flight),
            max_body_size: config.listener.max_body_size.unwrap_or(usize::MAX),
        })
    }
}

/// HTTP server for the bridge.
pub struct BridgeServer {
    router: Router,
}

impl BridgeServer {
    /// Create a new server with the given configuration.
    pub fn new(config: &BridgeConfig) -> Result<Self, UpstreamError> {
        let state = AppState::from_config(config)?;
        Ok(Self {
            router: build_router(state),
        })
    }

    /// Clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight relays are drained before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        // Printed regardless of the log filter.
        println!("{}", banner(addr));
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP bridge stopped");
        Ok(())
    }
}

/// Startup line announcing where the bridge listens.
pub fn banner(addr: SocketAddr) -> String {
    format!("HTTP bridge running on http://{addr}{BRIDGE_PATH}")
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(BRIDGE_PATH, post(bridge_handler).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| make_request_span(request)))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Any route or method other than `POST /bridge`.
async fn not_found(method: Method, uri: Uri) -> Response {
    let error = RelayError::NotFound {
        method: method.to_string(),
        target: uri.to_string(),
    };
    finish(Err(error))
}

/// `POST /bridge`.
async fn bridge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let _permit = state.limit.acquire().await;
    finish(relay(&state, request).await)
}

async fn relay(state: &AppState, request: Request<Body>) -> Result<RelayResponse, RelayError> {
    // The route matches on path alone; the full target must be exactly /bridge.
    if request.uri().query().is_some() {
        return Err(RelayError::NotFound {
            method: request.method().to_string(),
            target: request.uri().to_string(),
        });
    }

    let body = read_envelope(request, state.max_body_size).await?;
    let relay_request = RelayRequest::from_body(&body)?;
    Ok(state.client.relay(relay_request).await?)
}

fn finish(result: Result<RelayResponse, RelayError>) -> Response {
    match result {
        Ok(response) => {
            tracing::debug!(status = response.status, "Relay completed");
            metrics::record_request(metrics::OUTCOME_RELAYED);
            response.into_response()
        }
        Err(error) => {
            match &error {
                RelayError::Upstream(e) => tracing::warn!(error = %e, "Upstream call failed"),
                RelayError::NotFound { .. } => tracing::debug!(error = %error, "No route matched"),
                _ => tracing::debug!(error = %error, "Rejected envelope"),
            }
            metrics::record_request(error.outcome());
            error.into_response()
        }
    }
}
