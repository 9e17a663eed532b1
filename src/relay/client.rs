//! Outbound HTTP client.
//!
//! Wraps a shared [`reqwest::Client`] configured once from [`UpstreamConfig`].
//! Each call either completes (any status code) or fails with an
//! [`UpstreamError`]; there is no retry.

use std::str::FromStr;
use std::time::{Duration, Instant};

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    redirect, Client, Method,
};

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::relay::envelope::{RelayRequest, RelayResponse};
use crate::relay::error::UpstreamError;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Client used for every outbound call.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    inner: Client,
}

impl UpstreamClient {
    /// Build the client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);

        let inner = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { inner })
    }

    /// Perform the call on its own task.
    ///
    /// Once started the call runs to completion or timeout even if the
    /// inbound connection goes away. A panic inside the task surfaces as
    /// [`UpstreamError::Aborted`] instead of tearing down the connection.
    pub async fn relay(&self, request: RelayRequest) -> Result<RelayResponse, UpstreamError> {
        let client = self.clone();
        tokio::spawn(async move { client.execute(request).await }).await?
    }

    /// Perform the call on the current task.
    pub async fn execute(&self, request: RelayRequest) -> Result<RelayResponse, UpstreamError> {
        let method = parse_method(&request.method)?;
        let headers = build_headers(&request.headers)?;

        tracing::debug!(method = %method, url = %request.url, "Issuing outbound call");

        let mut builder = self.inner.request(method, &request.url).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let start = Instant::now();
        let result = async move {
            let response = builder.send().await?;
            let status = response.status().as_u16();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>(RelayResponse { status, text })
        }
        .await;
        metrics::record_upstream_duration(start, result.is_ok());

        Ok(result?)
    }
}

/// Methods are upper-cased before use; any other token is passed through.
fn parse_method(method: &str) -> Result<Method, UpstreamError> {
    Method::from_str(&method.to_ascii_uppercase())
        .map_err(|_| UpstreamError::InvalidMethod)
}

fn build_headers(headers: &std::collections::HashMap<String, String>) -> Result<HeaderMap, UpstreamError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| UpstreamError::InvalidHeaderValue)?;
        // Envelope keys may differ only in case; keep both.
        map.append(header_name, header_value);
    }
    Ok(map)
}
