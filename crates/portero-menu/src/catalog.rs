// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static menu catalog: category -> priced items with serving hours.
//!
//! Built once from configuration and shared read-only by the matcher, the
//! engine, and the model context assembly.

use portero_config::model::MenuConfig;

/// One priced item of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Item name as shown to guests and matched in order text.
    pub name: String,
    /// Integer unit price.
    pub price: i64,
    /// Whether the item can currently be ordered.
    pub available: bool,
}

/// One menu section: a named category with serving hours.
#[derive(Debug, Clone)]
pub struct MenuSection {
    pub name: String,
    pub hours: String,
    pub items: Vec<MenuItem>,
}

/// The full menu catalog plus the currency symbol used to render prices.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    sections: Vec<MenuSection>,
    currency: String,
}

impl MenuCatalog {
    /// Builds the catalog from configuration.
    pub fn from_config(menu: &MenuConfig, currency: &str) -> Self {
        let sections = menu
            .sections
            .iter()
            .map(|s| MenuSection {
                name: s.name.clone(),
                hours: s.hours.clone(),
                items: s
                    .items
                    .iter()
                    .map(|i| MenuItem {
                        name: i.name.clone(),
                        price: i.price,
                        available: i.available,
                    })
                    .collect(),
            })
            .collect();

        Self {
            sections,
            currency: currency.to_string(),
        }
    }

    /// The currency symbol used in rendered lines.
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// All sections in configuration order.
    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Iterates every item across all sections, in menu order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    /// Renders the complete menu: every section with its hours and every
    /// item with its price, no omissions and no duplicates.
    pub fn render_full(&self) -> String {
        let mut text = String::from("📋 Our Menu:\n\n");
        for section in &self.sections {
            text.push_str(&format!(
                "🍽 {} ({}):\n",
                section.name.to_uppercase(),
                section.hours
            ));
            for menu_item in &section.items {
                text.push_str(&format!(
                    "• {} - {}{}\n",
                    menu_item.name, self.currency, menu_item.price
                ));
            }
            text.push('\n');
        }
        text.push_str(
            "\nYou can say things like 'I'd like to order 2 pancakes' \
             or 'Can I get a towel + chicken sandwich?'",
        );
        text
    }

    /// Serializes the catalog for inclusion in a model context bundle.
    pub fn to_context_json(&self) -> String {
        let mut map = serde_json::Map::new();
        for section in &self.sections {
            let items: Vec<serde_json::Value> = section
                .items
                .iter()
                .map(|i| {
                    serde_json::Value::String(format!(
                        "{} - {}{}",
                        i.name, self.currency, i.price
                    ))
                })
                .collect();
            map.insert(section.name.clone(), serde_json::Value::Array(items));
        }
        serde_json::Value::Object(map).to_string()
    }

    /// Heuristic check for whether a model reply already lists menu content,
    /// used to avoid sending the full menu twice in one turn. A reply that
    /// names the catalog's first item is assumed to be a menu listing.
    pub fn reply_lists_menu(&self, reply: &str) -> bool {
        let lower = reply.to_lowercase();
        self.sections
            .first()
            .and_then(|s| s.items.first())
            .is_some_and(|i| lower.contains(&i.name.to_lowercase()))
    }
}
