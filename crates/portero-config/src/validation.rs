// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive prices, non-empty menu sections, and a
//! bindable gateway address.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::PorteroConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PorteroConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.hotel.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "hotel.name must not be empty".to_string(),
        });
    }

    if config.store.orders_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "store.orders_path must not be empty".to_string(),
        });
    }

    // Gateway host must be an IP address or hostname.
    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "gateway.host `{host}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if config.session.max_history == 0 {
        errors.push(ConfigError::Validation {
            message: "session.max_history must be at least 1".to_string(),
        });
    }

    if config.model.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "model.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.menu.sections.is_empty() {
        errors.push(ConfigError::Validation {
            message: "menu must have at least one section".to_string(),
        });
    }

    // Item names must be unique across the whole catalog: the matcher tests
    // every item against the same message and a duplicate would double-count.
    let mut seen_items = HashSet::new();
    for section in &config.menu.sections {
        if section.items.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("menu section `{}` has no items", section.name),
            });
        }
        for menu_item in &section.items {
            if menu_item.price <= 0 {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "menu item `{}` must have a positive price, got {}",
                        menu_item.name, menu_item.price
                    ),
                });
            }
            let lower = menu_item.name.to_lowercase();
            if !seen_items.insert(lower) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "duplicate menu item name `{}`",
                        menu_item.name
                    ),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
