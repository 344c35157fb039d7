// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wrapper around the language model seam for intent extraction and
//! free-form concierge replies.
//!
//! Every model call is bounded by the configured timeout. Structured
//! extraction never errors: timeouts and malformed output fall back to the
//! `Unknown` interpretation so the engine can continue deterministically.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use portero_core::{LanguageModel, PorteroError};

use crate::parse::{parse_interpretation, Interpretation};

/// Context bundle forwarded with every prompt.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub hotel_name: String,
    pub check_in_time: String,
    pub check_out_time: String,
    /// Serialized menu catalog (section -> item list).
    pub menu_json: String,
    /// Recent chat history as (role, content) pairs, oldest first.
    pub history: Vec<(String, String)>,
    /// "en" or "ne"; only affects free-form generation.
    pub language: String,
}

/// Interprets guest messages through a [`LanguageModel`].
pub struct IntentInterpreter {
    model: Arc<dyn LanguageModel>,
    call_timeout: Duration,
}

impl IntentInterpreter {
    pub fn new(model: Arc<dyn LanguageModel>, call_timeout: Duration) -> Self {
        Self {
            model,
            call_timeout,
        }
    }

    /// Classifies a guest message into a structured [`Interpretation`].
    ///
    /// Never fails: model errors, timeouts, and unparseable output all yield
    /// the `Unknown` fallback.
    pub async fn interpret(&self, ctx: &PromptContext, guest_msg: &str) -> Interpretation {
        let prompt = build_extraction_prompt(ctx, guest_msg);

        let response = match timeout(self.call_timeout, self.model.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(error = %e, "structured extraction call failed");
                return Interpretation::unknown();
            }
            Err(_) => {
                warn!(timeout = ?self.call_timeout, "structured extraction timed out");
                return Interpretation::unknown();
            }
        };

        let interpretation = parse_interpretation(&response);
        debug!(?interpretation, "guest message interpreted");
        interpretation
    }

    /// Produces a free-form concierge reply to relay verbatim.
    ///
    /// Errors and timeouts propagate as [`PorteroError`]; the engine maps
    /// them to its localized clarification fallback so the guest always
    /// receives a reply.
    pub async fn respond(
        &self,
        ctx: &PromptContext,
        guest_msg: &str,
    ) -> Result<String, PorteroError> {
        let prompt = build_conversation_prompt(ctx, guest_msg);

        match timeout(self.call_timeout, self.model.generate(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(PorteroError::Timeout {
                duration: self.call_timeout,
            }),
        }
    }
}

fn render_history(history: &[(String, String)]) -> String {
    history
        .iter()
        .map(|(role, content)| format!("{role}: {content}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_conversation_prompt(ctx: &PromptContext, guest_msg: &str) -> String {
    let language = if ctx.language == "ne" { "Nepali" } else { "English" };
    format!(
        "You are the concierge at {hotel}. Respond in {language}.\n\n\
         CONTEXT:\n\
         Check-in: {check_in}\n\
         Check-out: {check_out}\n\
         Menu: {menu}\n\
         Services: room service, housekeeping, restaurant\n\
         Recent conversation:\n{history}\n\n\
         GUEST MESSAGE: \"{guest_msg}\"\n\n\
         INSTRUCTIONS:\n\
         1. Assist with food orders, check-in/out times, hotel services, and requests like towels.\n\
         2. Keep a polite and helpful tone.",
        hotel = ctx.hotel_name,
        check_in = ctx.check_in_time,
        check_out = ctx.check_out_time,
        menu = ctx.menu_json,
        history = render_history(&ctx.history),
    )
}

fn build_extraction_prompt(ctx: &PromptContext, guest_msg: &str) -> String {
    format!(
        "You classify messages from guests of {hotel}.\n\n\
         MENU: {menu}\n\n\
         GUEST MESSAGE: \"{guest_msg}\"\n\n\
         Reply with ONLY a JSON object of this exact shape:\n\
         {{\"intent\": \"order|menu|amenity|question\", \
         \"roomNumber\": \"3-4 digit room number or null\", \
         \"orderItems\": [\"each requested item with its quantity\"]}}",
        hotel = ctx.hotel_name,
        menu = ctx.menu_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::GuestIntent;
    use async_trait::async_trait;
    use portero_core::types::{AdapterType, HealthStatus};
    use portero_core::PluginAdapter;

    /// Minimal in-crate model stub: fixed reply, optional delay.
    struct StubModel {
        reply: String,
        delay: Duration,
    }

    #[async_trait]
    impl PluginAdapter for StubModel {
        fn name(&self) -> &str {
            "stub-model"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 1, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::Model
        }
        async fn health_check(&self) -> Result<HealthStatus, PorteroError> {
            Ok(HealthStatus::Healthy)
        }
        async fn shutdown(&self) -> Result<(), PorteroError> {
            Ok(())
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        async fn generate(&self, _prompt: &str) -> Result<String, PorteroError> {
            tokio::time::sleep(self.delay).await;
            Ok(self.reply.clone())
        }
    }

    fn ctx() -> PromptContext {
        PromptContext {
            hotel_name: "Test Resort".to_string(),
            check_in_time: "2:00 PM".to_string(),
            check_out_time: "11:00 AM".to_string(),
            menu_json: r#"{"breakfast":["Pancakes - ₹450"]}"#.to_string(),
            history: vec![("guest".to_string(), "hi".to_string())],
            language: "en".to_string(),
        }
    }

    fn interpreter(reply: &str, delay: Duration) -> IntentInterpreter {
        IntentInterpreter::new(
            Arc::new(StubModel {
                reply: reply.to_string(),
                delay,
            }),
            Duration::from_millis(100),
        )
    }

    #[tokio::test]
    async fn interpret_parses_prose_wrapped_json() {
        let interp = interpreter(
            "Here you go: {\"intent\": \"order\", \"roomNumber\": \"512\", \"orderItems\": [\"2 pancakes\"]}",
            Duration::ZERO,
        );
        let result = interp.interpret(&ctx(), "2 pancakes to 512").await;
        assert_eq!(result.intent, GuestIntent::OrderFood);
        assert_eq!(result.room_number.as_deref(), Some("512"));
    }

    #[tokio::test]
    async fn interpret_times_out_to_unknown() {
        let interp = interpreter("{\"intent\": \"order\"}", Duration::from_secs(5));
        let result = interp.interpret(&ctx(), "anything").await;
        assert_eq!(result, Interpretation::unknown());
    }

    #[tokio::test]
    async fn respond_relays_model_text() {
        let interp = interpreter("Check-out is at 11 AM.", Duration::ZERO);
        let reply = interp.respond(&ctx(), "when is checkout?").await.unwrap();
        assert_eq!(reply, "Check-out is at 11 AM.");
    }

    #[tokio::test]
    async fn respond_timeout_is_an_error() {
        let interp = interpreter("too slow", Duration::from_secs(5));
        let err = interp.respond(&ctx(), "hello").await.unwrap_err();
        assert!(matches!(err, PorteroError::Timeout { .. }));
    }

    #[test]
    fn conversation_prompt_includes_context() {
        let prompt = build_conversation_prompt(&ctx(), "when is breakfast?");
        assert!(prompt.contains("Test Resort"));
        assert!(prompt.contains("2:00 PM"));
        assert!(prompt.contains("Pancakes"));
        assert!(prompt.contains("guest: hi"));
        assert!(prompt.contains("when is breakfast?"));
        assert!(prompt.contains("Respond in English"));
    }

    #[test]
    fn conversation_prompt_switches_language() {
        let mut context = ctx();
        context.language = "ne".to_string();
        let prompt = build_conversation_prompt(&context, "namaste");
        assert!(prompt.contains("Respond in Nepali"));
    }

    #[test]
    fn extraction_prompt_demands_bare_json() {
        let prompt = build_extraction_prompt(&ctx(), "2 pancakes");
        assert!(prompt.contains("ONLY a JSON object"));
        assert!(prompt.contains("roomNumber"));
        assert!(prompt.contains("orderItems"));
    }
}
