// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as endpoint URL schemes, contract address shape, and epoch counts.

use crate::diagnostic::ConfigError;
use crate::model::SoulfanConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SoulfanConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(invalid("server.host must not be empty".to_string()));
    }

    let urls = [
        ("replicate.base_url", Some(&config.replicate.base_url)),
        ("walrus.publisher_url", Some(&config.walrus.publisher_url)),
        ("walrus.aggregator_url", Some(&config.walrus.aggregator_url)),
        ("chain.rpc_url", Some(&config.chain.rpc_url)),
        ("xmtp.relay_url", config.xmtp.relay_url.as_ref()),
    ];
    for (key, value) in urls {
        if let Some(url) = value
            && !is_http_url(url)
        {
            errors.push(invalid(format!(
                "{key} `{url}` must be an http:// or https:// URL"
            )));
        }
    }

    if config.walrus.epochs == 0 {
        errors.push(invalid("walrus.epochs must be at least 1".to_string()));
    }

    if config.site.epochs == 0 {
        errors.push(invalid("site.epochs must be at least 1".to_string()));
    }

    if config.site.builder_bin.trim().is_empty() {
        errors.push(invalid("site.builder_bin must not be empty".to_string()));
    }

    for (key, value) in [
        ("chain.registry_address", &config.chain.registry_address),
        ("chain.usdc_address", &config.chain.usdc_address),
    ] {
        if !is_evm_address(value) {
            errors.push(invalid(format!(
                "{key} `{value}` must be a 0x-prefixed 20-byte hex address"
            )));
        }
    }

    if config.replicate.poll_interval_ms == 0 {
        errors.push(invalid(
            "replicate.poll_interval_ms must be greater than 0".to_string(),
        ));
    }

    if config.replicate.timeout_secs == 0 {
        errors.push(invalid(
            "replicate.timeout_secs must be greater than 0".to_string(),
        ));
    }

    if config.xmtp.inbox_capacity == 0 {
        errors.push(invalid("xmtp.inbox_capacity must be at least 1".to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Validation { message }
}

fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

fn is_evm_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = SoulfanConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_epochs_fails_validation() {
        let mut config = SoulfanConfig::default();
        config.walrus.epochs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "walrus.epochs"));
    }

    #[test]
    fn zero_replicate_timeout_fails_validation() {
        let mut config = SoulfanConfig::default();
        config.replicate.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(has_message(&errors, "replicate.timeout_secs"));
    }

    #[test]
    fn non_http_publisher_fails_validation() {
        let mut config = SoulfanConfig::default();
        config.walrus.publisher_url = "ftp://walrus".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "walrus.publisher_url"));
    }

    #[test]
    fn malformed_registry_address_fails_validation() {
        let mut config = SoulfanConfig::default();
        config.chain.registry_address = "0x1234".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "chain.registry_address"));
    }

    #[test]
    fn relay_url_is_checked_only_when_set() {
        let mut config = SoulfanConfig::default();
        assert!(validate_config(&config).is_ok());
        config.xmtp.relay_url = Some("relay.local".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "xmtp.relay_url"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = SoulfanConfig::default();
        config.walrus.epochs = 0;
        config.site.epochs = 0;
        config.server.host = " ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
