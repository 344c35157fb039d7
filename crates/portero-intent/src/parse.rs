// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of a structured interpretation from free-text model output.
//!
//! Models asked for JSON routinely wrap it in prose or code fences. The
//! parser takes only the first balanced `{...}` span and deserializes it
//! through a strict schema; anything that fails lands on the `Unknown`
//! fallback rather than reaching program logic as loosely-shaped data.

use serde::Deserialize;
use tracing::debug;

/// Classified guest intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestIntent {
    /// The guest wants to place a food order.
    OrderFood,
    /// The guest wants to see the menu.
    ShowMenu,
    /// The guest is asking for an amenity (towel, blanket, water).
    AmenityRequest,
    /// General conversation or a question about the hotel.
    SmallTalk,
    /// Unclassifiable, or the model output could not be parsed.
    Unknown,
}

impl GuestIntent {
    fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "order" | "order_food" => GuestIntent::OrderFood,
            "menu" | "show_menu" => GuestIntent::ShowMenu,
            "amenity" | "amenity_request" => GuestIntent::AmenityRequest,
            "question" | "small_talk" | "chat" => GuestIntent::SmallTalk,
            _ => GuestIntent::Unknown,
        }
    }
}

/// Validated result of a structured extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub intent: GuestIntent,
    /// Room number token, if the guest mentioned one.
    pub room_number: Option<String>,
    /// Raw item phrases the model extracted; matched against the catalog by
    /// the caller, never trusted as-is.
    pub order_items: Vec<String>,
}

impl Interpretation {
    /// The fallback value used on any parse or validation failure.
    pub fn unknown() -> Self {
        Self {
            intent: GuestIntent::Unknown,
            room_number: None,
            order_items: Vec::new(),
        }
    }
}

/// Wire shape of the model's JSON object, before validation.
#[derive(Debug, Deserialize)]
struct RawInterpretation {
    #[serde(default)]
    intent: String,
    #[serde(default, alias = "room_number")]
    #[serde(rename = "roomNumber")]
    room_number: Option<String>,
    #[serde(default, alias = "order_items")]
    #[serde(rename = "orderItems")]
    order_items: Vec<String>,
}

/// Returns the first balanced `{...}` span in `text`, tolerant of string
/// literals containing braces.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parses a model response into an [`Interpretation`].
///
/// Any failure -- no JSON object present, malformed JSON, wrong field types,
/// a room token that is not 3-4 digits -- produces the `Unknown` fallback.
pub fn parse_interpretation(response: &str) -> Interpretation {
    let Some(span) = first_json_object(response) else {
        debug!("model response contained no JSON object");
        return Interpretation::unknown();
    };

    let raw: RawInterpretation = match serde_json::from_str(span) {
        Ok(raw) => raw,
        Err(e) => {
            debug!(error = %e, "failed to deserialize model JSON");
            return Interpretation::unknown();
        }
    };

    let room_number = raw.room_number.filter(|r| {
        let t = r.trim();
        (3..=4).contains(&t.len()) && t.chars().all(|c| c.is_ascii_digit())
    });

    Interpretation {
        intent: GuestIntent::from_token(&raw.intent),
        room_number,
        order_items: raw
            .order_items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_plain_object() {
        assert_eq!(first_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn finds_object_wrapped_in_prose() {
        let text = "Sure! Here is the JSON you asked for:\n{\"intent\": \"order\"}\nLet me know.";
        assert_eq!(first_json_object(text), Some("{\"intent\": \"order\"}"));
    }

    #[test]
    fn finds_first_of_two_objects() {
        let text = r#"{"a": 1} trailing {"b": 2}"#;
        assert_eq!(first_json_object(text), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn handles_nested_objects_and_braces_in_strings() {
        let text = r#"note {"outer": {"inner": "has } brace"}} end"#;
        assert_eq!(
            first_json_object(text),
            Some(r#"{"outer": {"inner": "has } brace"}}"#)
        );
    }

    #[test]
    fn unterminated_object_yields_none() {
        assert_eq!(first_json_object(r#"{"a": 1"#), None);
        assert_eq!(first_json_object("no braces here"), None);
    }

    #[test]
    fn parses_full_interpretation() {
        let parsed = parse_interpretation(
            r#"{"intent": "order", "roomNumber": "512", "orderItems": ["2 pancakes"]}"#,
        );
        assert_eq!(parsed.intent, GuestIntent::OrderFood);
        assert_eq!(parsed.room_number.as_deref(), Some("512"));
        assert_eq!(parsed.order_items, ["2 pancakes"]);
    }

    #[test]
    fn parses_snake_case_aliases() {
        let parsed = parse_interpretation(
            r#"{"intent": "menu", "room_number": null, "order_items": []}"#,
        );
        assert_eq!(parsed.intent, GuestIntent::ShowMenu);
        assert!(parsed.room_number.is_none());
    }

    #[test]
    fn invalid_room_token_is_dropped() {
        let parsed =
            parse_interpretation(r#"{"intent": "order", "roomNumber": "fifth floor"}"#);
        assert_eq!(parsed.intent, GuestIntent::OrderFood);
        assert!(parsed.room_number.is_none());

        let parsed = parse_interpretation(r#"{"intent": "order", "roomNumber": "12"}"#);
        assert!(parsed.room_number.is_none());
    }

    #[test]
    fn unknown_intent_token_falls_back() {
        let parsed = parse_interpretation(r#"{"intent": "juggling"}"#);
        assert_eq!(parsed.intent, GuestIntent::Unknown);
    }

    #[test]
    fn garbage_falls_back_to_unknown() {
        assert_eq!(parse_interpretation("I couldn't help with that."), Interpretation::unknown());
        assert_eq!(parse_interpretation("{broken json"), Interpretation::unknown());
        assert_eq!(parse_interpretation(r#"{"intent": 7}"#), Interpretation::unknown());
    }

    #[test]
    fn blank_item_phrases_are_filtered() {
        let parsed = parse_interpretation(
            r#"{"intent": "order", "orderItems": ["  ", "1 pizza", ""]}"#,
        );
        assert_eq!(parsed.order_items, ["1 pizza"]);
    }
}
