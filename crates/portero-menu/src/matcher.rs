// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic extraction of ordered items from free-form guest text.
//!
//! Every catalog item is independently tested against the same message with
//! an optional leading quantity. A full-name match is tried first; failing
//! that, a word of the item name that belongs to no other item counts too,
//! so "2 pancakes" finds "Pancakes with Maple Syrup" while "chicken" alone
//! stays ambiguous. No model call, no network, no latency.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use crate::catalog::MenuCatalog;

/// Minimum length for a name word to participate in the unique-word fallback;
/// shorter words ("with", "and") are too generic to identify an item.
const MIN_WORD_LEN: usize = 4;

/// One matched order line before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// Catalog item name.
    pub name: String,
    /// Requested quantity, always positive.
    pub quantity: i64,
    /// Catalog unit price.
    pub unit_price: i64,
}

impl OrderLine {
    /// Line total with integer arithmetic; prices and quantities are
    /// integers, so there is no rounding ambiguity.
    pub fn total(&self) -> i64 {
        self.unit_price * self.quantity
    }

    /// Renders the persisted line form `"<name> x<qty> - <currency><total>"`.
    pub fn render(&self, currency: &str) -> String {
        format!("{} x{} - {}{}", self.name, self.quantity, currency, self.total())
    }
}

/// Result of matching a guest message against the catalog.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Rendered lines for every matched, orderable item.
    pub found: Vec<String>,
    /// Names of items the guest asked for that are currently unavailable.
    pub unavailable: Vec<String>,
}

/// Compiled per-item matcher over a menu catalog.
pub struct ItemMatcher {
    patterns: Vec<CompiledItem>,
    currency: String,
}

struct CompiledItem {
    name: String,
    unit_price: i64,
    available: bool,
    /// Optional quantity followed by the full item name.
    full_name: Regex,
    /// One pattern per name word unique to this item across the catalog.
    unique_words: Vec<Regex>,
}

impl ItemMatcher {
    /// Compiles the per-item patterns: an optional leading integer quantity,
    /// whitespace, then the full item name; plus fallback patterns for the
    /// item's unambiguous name words.
    pub fn new(catalog: &MenuCatalog) -> Self {
        // Count which lowercased name words appear in more than one item.
        let mut word_owners: HashMap<String, usize> = HashMap::new();
        for menu_item in catalog.items() {
            for word in name_words(&menu_item.name) {
                *word_owners.entry(word).or_insert(0) += 1;
            }
        }

        let patterns = catalog
            .items()
            .map(|menu_item| {
                let unique_words = name_words(&menu_item.name)
                    .into_iter()
                    .filter(|w| word_owners.get(w) == Some(&1))
                    .filter_map(|w| quantity_pattern(&w))
                    .collect();

                CompiledItem {
                    name: menu_item.name.clone(),
                    unit_price: menu_item.price,
                    available: menu_item.available,
                    // Escaped literals cannot fail to compile.
                    full_name: quantity_pattern(&menu_item.name)
                        .expect("escaped item name always compiles"),
                    unique_words,
                }
            })
            .collect();

        Self {
            patterns,
            currency: catalog.currency().to_string(),
        }
    }

    /// Matches a guest message against every catalog item.
    ///
    /// Each item matches at most once per message (only the first matching
    /// pattern counts). A missing quantity defaults to 1; an explicit zero
    /// quantity drops the item, so no emitted line has a non-positive
    /// quantity.
    pub fn match_items(&self, text: &str) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();

        for item in &self.patterns {
            let caps = item.full_name.captures(text).or_else(|| {
                item.unique_words.iter().find_map(|re| re.captures(text))
            });
            let Some(caps) = caps else {
                continue;
            };

            let quantity: i64 = match caps.get(1) {
                Some(digits) => digits.as_str().parse().unwrap_or(0),
                None => 1,
            };
            if quantity <= 0 {
                continue;
            }

            if !item.available {
                debug!(item = %item.name, "requested item is unavailable");
                outcome.unavailable.push(item.name.clone());
                continue;
            }

            let line = OrderLine {
                name: item.name.clone(),
                quantity,
                unit_price: item.unit_price,
            };
            outcome.found.push(line.render(&self.currency));
        }

        outcome
    }
}

/// Lowercased words of an item name long enough to be distinctive.
fn name_words(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split_whitespace()
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .map(|w| w.to_string())
        .collect()
}

/// `(\d+)?\s*\b<literal>\b`, case-insensitive.
fn quantity_pattern(literal: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)(\d+)?\s*\b{}\b", regex::escape(literal))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use portero_config::model::{MenuConfig, MenuItemConfig, MenuSectionConfig, PorteroConfig};

    fn matcher() -> ItemMatcher {
        let config = PorteroConfig::default();
        let catalog = MenuCatalog::from_config(&config.menu, &config.hotel.currency);
        ItemMatcher::new(&catalog)
    }

    #[test]
    fn explicit_quantity_multiplies_unit_price() {
        let outcome = matcher().match_items("I want to order 2 Pancakes with Maple Syrup");
        assert_eq!(outcome.found, ["Pancakes with Maple Syrup x2 - ₹900"]);
        assert!(outcome.unavailable.is_empty());
    }

    #[test]
    fn unique_word_identifies_the_item() {
        let outcome = matcher().match_items("I want to order 2 pancakes");
        assert_eq!(outcome.found, ["Pancakes with Maple Syrup x2 - ₹900"]);
    }

    #[test]
    fn ambiguous_word_matches_nothing() {
        // "chicken" belongs to both the sandwich and the burger.
        let outcome = matcher().match_items("some chicken please");
        assert!(outcome.found.is_empty());

        // "breakfast" belongs to two breakfast items.
        let outcome = matcher().match_items("send up breakfast");
        assert!(outcome.found.is_empty());
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let outcome = matcher().match_items("one Club Sandwich please");
        assert_eq!(outcome.found, ["Club Sandwich x1 - ₹450"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let outcome = matcher().match_items("3 GRILLED SALMON");
        assert_eq!(outcome.found, ["Grilled Salmon x3 - ₹3600"]);
    }

    #[test]
    fn multiple_items_in_one_message() {
        let outcome = matcher()
            .match_items("2 chicken burger and a chocolate lava cake");
        assert_eq!(
            outcome.found,
            ["Chicken Burger x2 - ₹1100", "Chocolate Lava Cake x1 - ₹350"]
        );
    }

    #[test]
    fn item_matches_at_most_once_per_message() {
        let outcome = matcher().match_items("beef steak, and another beef steak");
        assert_eq!(outcome.found, ["Beef Steak x1 - ₹1500"]);
    }

    #[test]
    fn zero_quantity_is_dropped() {
        let outcome = matcher().match_items("0 margherita pizza");
        assert!(outcome.found.is_empty());
    }

    #[test]
    fn no_menu_items_yields_empty_outcome() {
        let outcome = matcher().match_items("can I get a towel?");
        assert!(outcome.found.is_empty());
        assert!(outcome.unavailable.is_empty());
    }

    #[test]
    fn unavailable_item_reported_not_added() {
        let menu = MenuConfig {
            sections: vec![MenuSectionConfig {
                name: "specials".to_string(),
                hours: "24/7".to_string(),
                items: vec![
                    MenuItemConfig {
                        name: "Lobster Thermidor".to_string(),
                        price: 2500,
                        available: false,
                    },
                    MenuItemConfig {
                        name: "Garden Salad".to_string(),
                        price: 300,
                        available: true,
                    },
                ],
            }],
        };
        let catalog = MenuCatalog::from_config(&menu, "₹");
        let matcher = ItemMatcher::new(&catalog);

        let outcome = matcher.match_items("lobster thermidor and a garden salad");
        assert_eq!(outcome.found, ["Garden Salad x1 - ₹300"]);
        assert_eq!(outcome.unavailable, ["Lobster Thermidor"]);
    }

    #[test]
    fn quantity_embedded_mid_sentence() {
        let outcome = matcher().match_items("please send 4 vegetable curry to my room");
        assert_eq!(outcome.found, ["Vegetable Curry x4 - ₹2400"]);
    }

    #[test]
    fn unique_word_respects_word_boundaries() {
        // "pizzas" must not match the "pizza" unique word mid-token... but a
        // trailing plural still fails the \b boundary only when letters
        // continue, so check an embedded case.
        let outcome = matcher().match_items("the pizzeria downstairs is closed");
        assert!(outcome.found.is_empty());
    }
}
