// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed guest-facing prompt templates, localized per session language.
//!
//! Every deterministic step prompt exists in both languages so a guest who
//! switched to Nepali is not bounced back to English mid-flow. Manager
//! replies stay English only.

use portero_core::types::{ChoiceOption, ChoicePrompt};

use crate::session::Language;

pub fn reset_done(lang: Language) -> &'static str {
    match lang {
        Language::En => "🔄 Chat has been reset. How may I assist you today?",
        Language::Ne => "🔄 कुराकानी रिसेट भयो। म तपाईंलाई कसरी सहयोग गर्न सक्छु?",
    }
}

pub fn ask_room(lang: Language) -> &'static str {
    match lang {
        Language::En => "May I have your room number to start your order?",
        Language::Ne => "अर्डर सुरु गर्न कृपया आफ्नो कोठा नम्बर दिनुहोस्।",
    }
}

pub fn invalid_room(lang: Language) -> &'static str {
    match lang {
        Language::En => "Please enter a valid 3-4 digit room number:",
        Language::Ne => "कृपया मान्य ३-४ अंकको कोठा नम्बर लेख्नुहोस्:",
    }
}

pub fn ask_order(lang: Language) -> &'static str {
    match lang {
        Language::En => "Thank you! What would you like to order from our menu?",
        Language::Ne => "धन्यवाद! हाम्रो मेनुबाट के अर्डर गर्न चाहनुहुन्छ?",
    }
}

pub fn no_items_found(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "I couldn't find any valid items. Would you like to see our menu again?"
        }
        Language::Ne => "मैले कुनै मान्य परिकार भेटिनँ। के तपाईं हाम्रो मेनु फेरि हेर्न चाहनुहुन्छ?",
    }
}

pub fn retry_order(lang: Language) -> &'static str {
    match lang {
        Language::En => "Let's try again. What would you like to order?",
        Language::Ne => "फेरि प्रयास गरौं। के अर्डर गर्न चाहनुहुन्छ?",
    }
}

pub fn clarify_confirmation(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "Please reply \"yes\" to confirm your order or \"no\" to change it."
        }
        Language::Ne => "कृपया अर्डर पक्का गर्न \"yes\" वा बदल्न \"no\" लेख्नुहोस्।",
    }
}

pub fn amenity_noted(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "✅ Your request has been noted. A staff member will attend to your room shortly."
        }
        Language::Ne => "✅ तपाईंको अनुरोध टिपियो। कर्मचारी चाँडै तपाईंको कोठामा आउनेछन्।",
    }
}

pub fn clarification_fallback(lang: Language) -> &'static str {
    match lang {
        Language::En => "I'm having trouble understanding. Could you please rephrase that?",
        Language::Ne => "मैले राम्ररी बुझिनँ। कृपया फेरि भन्नुहोस्।",
    }
}

pub fn order_placed(lang: Language, id: i64) -> String {
    match lang {
        Language::En => format!(
            "Your order #{id} has been placed! It will arrive in 30-45 minutes."
        ),
        Language::Ne => format!(
            "तपाईंको अर्डर #{id} दर्ता भयो! ३०-४५ मिनेटमा आइपुग्नेछ।"
        ),
    }
}

pub fn rating_thanks(lang: Language, stars: &str) -> String {
    match lang {
        Language::En => format!("Thank you for rating us ⭐{stars}!"),
        Language::Ne => format!("⭐{stars} मूल्याङ्कनको लागि धन्यवाद!"),
    }
}

/// Renders the order summary with a yes/no question, including a warning
/// for any recognized-but-unavailable items.
pub fn order_summary(
    lang: Language,
    room: &str,
    items: &[String],
    unavailable: &[String],
) -> String {
    let mut text = match lang {
        Language::En => format!("Your order:\nRoom {room}\nItems:\n{}", items.join("\n")),
        Language::Ne => format!(
            "तपाईंको अर्डर:\nकोठा {room}\nपरिकारहरू:\n{}",
            items.join("\n")
        ),
    };
    if !unavailable.is_empty() {
        let warning = match lang {
            Language::En => "⚠️ These items are not available: ",
            Language::Ne => "⚠️ यी परिकारहरू उपलब्ध छैनन्: ",
        };
        text.push_str(&format!("\n\n{warning}{}", unavailable.join(", ")));
    }
    text.push_str(match lang {
        Language::En => "\n\nDoes this look correct? (Reply \"yes\" to confirm or \"no\" to change)",
        Language::Ne => "\n\nके यो ठीक छ? (पक्का गर्न \"yes\", बदल्न \"no\" लेख्नुहोस्)",
    });
    text
}

/// The 1-5 star rating prompt presented after an order is placed.
pub fn rating_prompt(lang: Language) -> ChoicePrompt {
    let text = match lang {
        Language::En => "🙏 We'd love your feedback! Please rate us:",
        Language::Ne => "🙏 तपाईंको प्रतिक्रिया चाहन्छौं! कृपया मूल्याङ्कन गर्नुहोस्:",
    };
    ChoicePrompt {
        text: text.to_string(),
        options: (1..=5)
            .map(|n| ChoiceOption {
                label: format!("⭐ {n}"),
                id: format!("star_{n}"),
            })
            .collect(),
        title: "Rate Us".to_string(),
        footer: match lang {
            Language::En => "Tap one below to rate our service.".to_string(),
            Language::Ne => "सेवा मूल्याङ्कन गर्न तल थिच्नुहोस्।".to_string(),
        },
    }
}

// Manager-facing replies (the manager interface is English).

pub fn order_marked(id: i64, status: &str) -> String {
    format!("Order #{id} marked as {status}.")
}

pub fn order_not_found(id: i64) -> String {
    format!("Order #{id} not found.")
}
