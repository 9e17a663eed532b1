//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Keep the listener on loopback: the bridge has no caller authentication
//! - Validate value ranges (timeouts > 0, limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BridgeConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("listener.bind_address `{0}` is not a loopback address")]
    NonLoopbackBind(String),

    #[error("listener.max_in_flight must be greater than zero")]
    ZeroInFlight,

    #[error("listener.max_body_size must be greater than zero")]
    ZeroBodySize,

    #[error("upstream.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.metrics_address `{0}` is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let bind = &config.listener.bind_address;
    match bind.parse::<SocketAddr>() {
        Ok(addr) if !addr.ip().is_loopback() => {
            errors.push(ValidationError::NonLoopbackBind(bind.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::InvalidBindAddress(bind.clone())),
    }

    if config.listener.max_in_flight == Some(0) {
        errors.push(ValidationError::ZeroInFlight);
    }
    if config.listener.max_body_size == Some(0) {
        errors.push(ValidationError::ZeroBodySize);
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(obs.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&BridgeConfig::default()).is_ok());
    }

    #[test]
    fn rejects_wildcard_bind() {
        let mut config = BridgeConfig::default();
        config.listener.bind_address = "0.0.0.0:8766".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NonLoopbackBind("0.0.0.0:8766".into())]);
    }

    #[test]
    fn accepts_ipv6_loopback() {
        let mut config = BridgeConfig::default();
        config.listener.bind_address = "[::1]:8766".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = BridgeConfig::default();
        config.listener.bind_address = "localhost".into();
        config.listener.max_in_flight = Some(0);
        config.listener.max_body_size = Some(0);
        config.upstream.timeout_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nope".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroBodySize));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::ZeroInFlight));
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = BridgeConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());
    }
}
