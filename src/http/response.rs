//! Response encoding.
//!
//! # Responsibilities
//! - Encode a completed relay as a JSON 200 with explicit Content-Length
//! - Map relay errors to status codes
//!
//! # Design Decisions
//! - Error responses carry no body; details stay in the logs
//! - The target's status code travels inside the envelope, never on the wire

use axum::{
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::relay::{RelayError, RelayResponse};

impl RelayError {
    /// Status code sent to the caller for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::NotFound { .. } => StatusCode::NOT_FOUND,
            RelayError::Body(_) | RelayError::Decode(_) | RelayError::MissingUrl => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        self.status_code().into_response()
    }
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        let bytes = self.to_json();
        (
            StatusCode::OK,
            [
                (CONTENT_TYPE, HeaderValue::from_static("application/json")),
                (CONTENT_LENGTH, HeaderValue::from(bytes.len())),
            ],
            bytes,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::UpstreamError;

    async fn body_of(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn errors_have_empty_bodies() {
        let cases = [
            (
                RelayError::NotFound {
                    method: "GET".into(),
                    target: "/".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (RelayError::MissingUrl, StatusCode::BAD_REQUEST),
            (
                RelayError::Upstream(UpstreamError::Timeout),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), status);
            assert!(body_of(response).await.is_empty());
        }
    }

    #[tokio::test]
    async fn relay_response_is_json_with_length() {
        let response = RelayResponse {
            status: 503,
            text: "down".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let length: usize = response.headers()[CONTENT_LENGTH]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();

        let body = body_of(response).await;
        assert_eq!(body.len(), length);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"status": 503, "text": "down"}));
    }
}
