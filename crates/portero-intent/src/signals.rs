// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic keyword scan for conversational triggers.
//!
//! Zero-cost heuristics evaluated before (and after) any model call. The
//! engine scans both the guest message and the model reply with these
//! tables, so a trigger fires whichever side of the conversation mentions it.

/// Phrases indicating the guest wants to start a food order.
const ORDER_KEYWORDS: &[&str] = &["order", "want to eat", "hungry"];

/// Phrases indicating the guest wants the menu.
const MENU_KEYWORDS: &[&str] = &["menu", "show me food", "what can i eat"];

/// Amenity requests acknowledged with a "noted" reply.
const AMENITY_KEYWORDS: &[&str] = &["towel", "blanket", "water"];

/// Triggers detected in a piece of conversation text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub wants_order: bool,
    pub wants_menu: bool,
    pub amenity_request: bool,
}

impl Signals {
    /// Whether any trigger fired.
    pub fn any(&self) -> bool {
        self.wants_order || self.wants_menu || self.amenity_request
    }
}

/// Scans text for conversational triggers, case-insensitively.
pub fn scan(text: &str) -> Signals {
    let lower = text.to_lowercase();
    Signals {
        wants_order: ORDER_KEYWORDS.iter().any(|k| lower.contains(k)),
        wants_menu: MENU_KEYWORDS.iter().any(|k| lower.contains(k)),
        amenity_request: AMENITY_KEYWORDS.iter().any(|k| lower.contains(k)),
    }
}
