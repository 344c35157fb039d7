// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./portero.toml` > `~/.config/portero/portero.toml`
//! > `/etc/portero/portero.toml` with environment variable overrides via the
//! `PORTERO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PorteroConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/portero/portero.toml` (system-wide)
/// 3. `~/.config/portero/portero.toml` (user XDG config)
/// 4. `./portero.toml` (local directory)
/// 5. `PORTERO_*` environment variables
pub fn load_config() -> Result<PorteroConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorteroConfig::default()))
        .merge(Toml::file("/etc/portero/portero.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("portero/portero.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("portero.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<PorteroConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorteroConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PorteroConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PorteroConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PORTERO_HOTEL_MANAGER_ADDRESS` must map
/// to `hotel.manager_address`, not `hotel.manager.address`.
fn env_provider() -> Env {
    Env::prefixed("PORTERO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PORTERO_MODEL_API_KEY -> "model_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("hotel_", "hotel.", 1)
            .replacen("session_", "session.", 1)
            .replacen("model_", "model.", 1)
            .replacen("store_", "store.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
