//! Relay envelope types.
//!
//! The inbound JSON object describing the call to make, and the JSON object
//! returned once that call completes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::relay::error::RelayError;

/// Method used when the envelope does not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// Body assumed when the inbound request declares no content.
pub const EMPTY_ENVELOPE: &[u8] = b"{}";

/// Envelope as it arrives on the wire. Every field is optional here;
/// [`RawEnvelope::validate`] turns it into a [`RelayRequest`].
#[derive(Debug, Default, Deserialize)]
pub struct RawEnvelope {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl RawEnvelope {
    /// Decode an envelope from raw body bytes.
    ///
    /// Anything other than a JSON object with correctly typed fields is a
    /// decode error.
    pub fn decode(bytes: &[u8]) -> Result<Self, RelayError> {
        serde_json::from_slice(bytes).map_err(RelayError::Decode)
    }

    /// Apply defaults and reject envelopes without a target.
    pub fn validate(self) -> Result<RelayRequest, RelayError> {
        let url = match self.url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(RelayError::MissingUrl),
        };

        Ok(RelayRequest {
            url,
            method: self.method.unwrap_or_else(|| DEFAULT_METHOD.to_string()),
            headers: self.headers.unwrap_or_default(),
            body: self.body,
        })
    }
}

/// A validated request to relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl RelayRequest {
    /// Decode and validate in one step.
    pub fn from_body(bytes: &[u8]) -> Result<Self, RelayError> {
        RawEnvelope::decode(bytes)?.validate()
    }
}

/// Result of a completed outbound call, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub status: u16,
    pub text: String,
}

impl RelayResponse {
    /// Serialize to the JSON bytes sent back to the caller.
    pub fn to_json(&self) -> Vec<u8> {
        // Two plain fields; serialization into a Vec cannot fail.
        serde_json::to_vec(self).unwrap_or_default()
    }
}
