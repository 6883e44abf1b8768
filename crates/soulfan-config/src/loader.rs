// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./soulfan.toml` > `~/.config/soulfan/soulfan.toml` > `/etc/soulfan/soulfan.toml`
//! with environment variable overrides via `SOULFAN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SoulfanConfig;

/// Config sections, in the order env keys are matched against.
const SECTIONS: &[&str] = &["server", "replicate", "walrus", "site", "chain", "xmtp"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/soulfan/soulfan.toml`
/// 3. `~/.config/soulfan/soulfan.toml`
/// 4. `./soulfan.toml`
/// 5. `SOULFAN_*` environment variables
pub fn load_config() -> Result<SoulfanConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SoulfanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SoulfanConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SoulfanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SoulfanConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SoulfanConfig::default()))
        .merge(Toml::file("/etc/soulfan/soulfan.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("soulfan/soulfan.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("soulfan.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `SOULFAN_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SOULFAN_REPLICATE_API_TOKEN` is `replicate.api_token`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("SOULFAN_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
