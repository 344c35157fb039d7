// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Portero concierge agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Menu defaults reproduce a working sample menu so
//! a bare config file is fully functional.

use serde::{Deserialize, Serialize};

/// Top-level Portero configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PorteroConfig {
    /// Agent identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Hotel identity, manager address, and front-desk times.
    #[serde(default)]
    pub hotel: HotelConfig,

    /// Conversation session retention settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Language model settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Order store settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Dashboard gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Menu catalog: sections with serving hours and priced items.
    #[serde(default)]
    pub menu: MenuConfig,
}

/// Agent identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the agent.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "portero".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Hotel identity and front-desk configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HotelConfig {
    /// Hotel display name, used in prompts and model context.
    #[serde(default = "default_hotel_name")]
    pub name: String,

    /// Channel address of the manager who receives order notifications and
    /// may issue status commands.
    #[serde(default)]
    pub manager_address: String,

    /// Reception phone extension quoted in guest-facing messages.
    #[serde(default = "default_reception_extension")]
    pub reception_extension: String,

    /// Check-in time, quoted verbatim in model context.
    #[serde(default = "default_check_in")]
    pub check_in_time: String,

    /// Check-out time, quoted verbatim in model context.
    #[serde(default = "default_check_out")]
    pub check_out_time: String,

    /// Currency symbol used in rendered order lines.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            name: default_hotel_name(),
            manager_address: String::new(),
            reception_extension: default_reception_extension(),
            check_in_time: default_check_in(),
            check_out_time: default_check_out(),
            currency: default_currency(),
        }
    }
}

fn default_hotel_name() -> String {
    "Hotel Sitasharan Resort".to_string()
}

fn default_reception_extension() -> String {
    "22".to_string()
}

fn default_check_in() -> String {
    "2:00 PM".to_string()
}

fn default_check_out() -> String {
    "11:00 AM".to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}

/// Conversation session retention configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seconds of inactivity after which a session is swept from the table.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Maximum chat history entries retained per session; oldest evicted first.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            max_history: default_max_history(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    1800
}

fn default_max_history() -> usize {
    40
}

/// Language model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// API key. `None` requires the environment variable override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier for generation requests.
    #[serde(default = "default_model_name")]
    pub model: String,

    /// Seconds to wait for a model response before falling back.
    #[serde(default = "default_model_timeout")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model_name(),
            timeout_secs: default_model_timeout(),
        }
    }
}

fn default_model_name() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_model_timeout() -> u64 {
    20
}

/// Order store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Path of the persisted order collection file.
    #[serde(default = "default_orders_path")]
    pub orders_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            orders_path: default_orders_path(),
        }
    }
}

fn default_orders_path() -> String {
    "orders.json".to_string()
}

/// Dashboard gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    5000
}

/// Menu catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MenuConfig {
    /// Ordered menu sections.
    #[serde(default = "default_menu_sections")]
    pub sections: Vec<MenuSectionConfig>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            sections: default_menu_sections(),
        }
    }
}

/// One menu section: a named category with serving hours and priced items.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MenuSectionConfig {
    /// Section name (e.g. "breakfast").
    pub name: String,

    /// Serving hours, quoted verbatim in the rendered menu.
    pub hours: String,

    /// Items in this section.
    pub items: Vec<MenuItemConfig>,
}

/// One priced menu item.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MenuItemConfig {
    /// Item name as shown to guests and matched in order text.
    pub name: String,

    /// Integer unit price in the configured currency.
    pub price: i64,

    /// Whether the item can currently be ordered. Unavailable items are
    /// recognized in order text but reported back instead of added.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

fn item(name: &str, price: i64) -> MenuItemConfig {
    MenuItemConfig {
        name: name.to_string(),
        price,
        available: true,
    }
}

fn default_menu_sections() -> Vec<MenuSectionConfig> {
    vec![
        MenuSectionConfig {
            name: "breakfast".to_string(),
            hours: "7:00 AM - 10:30 AM".to_string(),
            items: vec![
                item("Continental Breakfast", 500),
                item("Full English Breakfast", 750),
                item("Pancakes with Maple Syrup", 450),
            ],
        },
        MenuSectionConfig {
            name: "lunch".to_string(),
            hours: "12:00 PM - 3:00 PM".to_string(),
            items: vec![
                item("Grilled Chicken Sandwich", 650),
                item("Margherita Pizza", 800),
                item("Vegetable Pasta", 550),
            ],
        },
        MenuSectionConfig {
            name: "dinner".to_string(),
            hours: "6:30 PM - 11:00 PM".to_string(),
            items: vec![
                item("Grilled Salmon", 1200),
                item("Beef Steak", 1500),
                item("Vegetable Curry", 600),
            ],
        },
        MenuSectionConfig {
            name: "room service".to_string(),
            hours: "24/7".to_string(),
            items: vec![
                item("Club Sandwich", 450),
                item("Chicken Burger", 550),
                item("Chocolate Lava Cake", 350),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_four_menu_sections() {
        let config = PorteroConfig::default();
        assert_eq!(config.menu.sections.len(), 4);
        let names: Vec<&str> = config
            .menu
            .sections
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["breakfast", "lunch", "dinner", "room service"]);
    }

    #[test]
    fn default_items_are_available() {
        let config = PorteroConfig::default();
        assert!(config
            .menu
            .sections
            .iter()
            .flat_map(|s| &s.items)
            .all(|i| i.available));
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = PorteroConfig::default();
        assert_eq!(config.agent.name, "portero");
        assert_eq!(config.session.idle_timeout_secs, 1800);
        assert_eq!(config.session.max_history, 40);
        assert_eq!(config.model.timeout_secs, 20);
        assert_eq!(config.store.orders_path, "orders.json");
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.hotel.currency, "₹");
    }
}
