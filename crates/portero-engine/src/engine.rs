// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversational order-intake state machine.
//!
//! Owns the session table and drives step transitions for every inbound
//! event: deterministic matching first, the language model where free-form
//! dialogue is needed, and a confirm/deny exchange before an order is
//! committed exactly once.
//!
//! Events are processed one at a time by a single worker, which is what
//! makes the timestamp-derived order ids and the session table safe without
//! further locking inside this type.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, info, warn};

use portero_core::messages::{is_channel_address, new_order_summary, status_update_text};
use portero_core::types::{InboundEvent, InteractionKind, OrderStatus};
use portero_core::{MessageChannel, PorteroError};
use portero_intent::{signals, GuestIntent, IntentInterpreter, PromptContext, Signals};
use portero_menu::{ItemMatcher, MenuCatalog};
use portero_store::{OrderDraft, OrderStore};

use crate::commands::ManagerCommand;
use crate::prompts;
use crate::session::{ConversationSession, Language, Role, Step};
use crate::session_store::SessionStore;

/// Engine-level settings distilled from configuration.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub hotel_name: String,
    pub manager_address: String,
    pub check_in_time: String,
    pub check_out_time: String,
    pub max_history: usize,
}

/// Drives per-guest conversations and commits completed orders.
pub struct ConversationEngine {
    channel: Arc<dyn MessageChannel>,
    orders: Arc<OrderStore>,
    sessions: SessionStore,
    catalog: MenuCatalog,
    matcher: ItemMatcher,
    interpreter: IntentInterpreter,
    settings: EngineSettings,
    room_pattern: Regex,
    bare_digits_pattern: Regex,
}

impl ConversationEngine {
    pub fn new(
        channel: Arc<dyn MessageChannel>,
        orders: Arc<OrderStore>,
        interpreter: IntentInterpreter,
        catalog: MenuCatalog,
        settings: EngineSettings,
        session_idle_timeout: Duration,
    ) -> Self {
        let matcher = ItemMatcher::new(&catalog);
        Self {
            channel,
            orders,
            sessions: SessionStore::new(session_idle_timeout),
            catalog,
            matcher,
            interpreter,
            settings,
            // Fixed patterns; compilation cannot fail.
            room_pattern: Regex::new(r"(?i)room\s*(\d{3,4})").unwrap(),
            bare_digits_pattern: Regex::new(r"(\d{3,4})").unwrap(),
        }
    }

    /// The live session table (exposed for sweeps and tests).
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Drops sessions idle for longer than the configured timeout.
    pub async fn sweep_idle_sessions(&self) -> usize {
        self.sessions.sweep_idle().await
    }

    /// Processes one inbound event.
    ///
    /// Only persistence failures propagate; everything else is recovered
    /// locally so the guest always gets a reply.
    pub async fn handle_event(&self, event: InboundEvent) -> Result<(), PorteroError> {
        if event.is_group {
            debug!(sender = %event.sender, "ignoring group message");
            return Ok(());
        }
        if event.interaction == InteractionKind::ButtonReply {
            return self.handle_button_reply(&event).await;
        }

        let raw = event.body.trim();
        if raw.is_empty() {
            return Ok(());
        }
        let sender = event.sender.as_str();

        // A language-switch marker sets the session language persistently.
        let (text, switched_to_nepali) = match raw.strip_prefix("/ne ") {
            Some(rest) => (rest.trim(), true),
            None => (raw, false),
        };

        let mut session = self.sessions.get(sender).await.unwrap_or_default();
        if switched_to_nepali {
            session.language = Language::Ne;
        }
        session.touch();

        if text.eq_ignore_ascii_case("reset") {
            let lang = session.language;
            self.sessions.remove(sender).await;
            self.send(sender, prompts::reset_done(lang)).await;
            return Ok(());
        }

        if sender == self.settings.manager_address
            && let Some(cmd) = ManagerCommand::parse(text)
        {
            return self.handle_manager_command(cmd).await;
        }

        match session.step {
            Some(Step::AwaitingRoom) => self.handle_room(sender, session, text).await,
            Some(Step::AwaitingOrder) => self.handle_order(sender, session, text).await,
            Some(Step::AwaitingConfirmation) => {
                self.handle_confirmation(sender, session, text).await
            }
            None => self.handle_stepless(sender, session, text).await,
        }
    }

    // --- Step handlers ---

    async fn handle_room(
        &self,
        sender: &str,
        mut session: ConversationSession,
        text: &str,
    ) -> Result<(), PorteroError> {
        let lang = session.language;
        let Some(room) = self.extract_room(text) else {
            self.send(sender, prompts::invalid_room(lang)).await;
            self.sessions.upsert(sender, session).await;
            return Ok(());
        };

        session.room = Some(room.clone());
        if session.items.is_empty() {
            session.step = Some(Step::AwaitingOrder);
            self.sessions.upsert(sender, session).await;
            self.send(sender, prompts::ask_order(lang)).await;
        } else {
            // Items were already captured when the flow started; go straight
            // to confirmation.
            let summary = prompts::order_summary(lang, &room, &session.items, &[]);
            session.step = Some(Step::AwaitingConfirmation);
            self.sessions.upsert(sender, session).await;
            self.send(sender, &summary).await;
        }
        Ok(())
    }

    async fn handle_order(
        &self,
        sender: &str,
        mut session: ConversationSession,
        text: &str,
    ) -> Result<(), PorteroError> {
        let lang = session.language;
        let outcome = self.matcher.match_items(text);

        if outcome.found.is_empty() {
            self.send(sender, prompts::no_items_found(lang)).await;
            self.send(sender, &self.catalog.render_full()).await;
            self.sessions.upsert(sender, session).await;
            return Ok(());
        }

        let room = session.room.clone().unwrap_or_default();
        let summary = prompts::order_summary(lang, &room, &outcome.found, &outcome.unavailable);
        session.items = outcome.found;
        session.step = Some(Step::AwaitingConfirmation);
        self.sessions.upsert(sender, session).await;
        self.send(sender, &summary).await;
        Ok(())
    }

    async fn handle_confirmation(
        &self,
        sender: &str,
        mut session: ConversationSession,
        text: &str,
    ) -> Result<(), PorteroError> {
        let lang = session.language;
        let lower = text.to_lowercase();

        if lower.contains("yes") {
            return self.commit_order(sender, session).await;
        }

        if lower.contains("no") {
            session.items.clear();
            session.step = Some(Step::AwaitingOrder);
            self.sessions.upsert(sender, session).await;
            self.send(sender, prompts::retry_order(lang)).await;
            return Ok(());
        }

        // Neither yes nor no: clarify instead of stalling silently.
        self.sessions.upsert(sender, session).await;
        self.send(sender, prompts::clarify_confirmation(lang)).await;
        Ok(())
    }

    /// The commit path. Persists strictly before any success messaging: a
    /// store failure propagates and the guest sees no false confirmation,
    /// with the session left intact for a retry.
    async fn commit_order(
        &self,
        sender: &str,
        session: ConversationSession,
    ) -> Result<(), PorteroError> {
        let lang = session.language;
        let room = session.room.clone().ok_or_else(|| {
            PorteroError::Internal("confirmation step reached without a room".into())
        })?;

        let draft = OrderDraft {
            room,
            items: session.items.clone(),
            guest_address: Some(sender.to_string()),
        };
        let order = self.orders.append(draft).await?;

        self.send(&self.settings.manager_address, &new_order_summary(&order))
            .await;
        self.send(sender, &prompts::order_placed(lang, order.id)).await;
        if let Err(e) = self
            .channel
            .send_choice(sender, prompts::rating_prompt(lang))
            .await
        {
            warn!(error = %e, "failed to deliver rating prompt");
        }

        self.sessions.remove(sender).await;
        info!(order_id = order.id, "order committed and session cleared");
        Ok(())
    }

    // --- Stepless path ---

    async fn handle_stepless(
        &self,
        sender: &str,
        mut session: ConversationSession,
        text: &str,
    ) -> Result<(), PorteroError> {
        let lang = session.language;
        let guest_signals = signals::scan(text);
        let matched = self.matcher.match_items(text);

        if guest_signals.amenity_request {
            self.send(sender, prompts::amenity_noted(lang)).await;
        }

        // Deterministic food intent: an order keyword or a direct menu-item
        // hit. Any items named now are carried into the flow so the guest is
        // not asked for them twice.
        if guest_signals.wants_order || !matched.found.is_empty() {
            session.items = matched.found;
            self.begin_order(sender, session).await;
            return Ok(());
        }

        // Keywords were silent: ask the model for a structured reading.
        let ctx = self.prompt_context(&session);
        let interpretation = self.interpreter.interpret(&ctx, text).await;

        match interpretation.intent {
            GuestIntent::OrderFood => {
                session.room = interpretation.room_number.clone();
                if !interpretation.order_items.is_empty() {
                    let joined = interpretation.order_items.join(", ");
                    session.items = self.matcher.match_items(&joined).found;
                }
                self.advance_interpreted_order(sender, session).await;
                Ok(())
            }
            GuestIntent::ShowMenu => {
                self.send(sender, &self.catalog.render_full()).await;
                self.sessions.upsert(sender, session).await;
                Ok(())
            }
            GuestIntent::AmenityRequest => {
                if !guest_signals.amenity_request {
                    self.send(sender, prompts::amenity_noted(lang)).await;
                }
                self.sessions.upsert(sender, session).await;
                Ok(())
            }
            GuestIntent::SmallTalk | GuestIntent::Unknown => {
                self.relay_model_reply(sender, session, text, guest_signals)
                    .await
            }
        }
    }

    /// Continues an order flow from whatever the structured interpretation
    /// already extracted (room and/or items), prompting only for what is
    /// still missing.
    async fn advance_interpreted_order(&self, sender: &str, mut session: ConversationSession) {
        let lang = session.language;
        match (session.room.clone(), session.items.is_empty()) {
            (Some(room), false) => {
                let summary = prompts::order_summary(lang, &room, &session.items, &[]);
                session.step = Some(Step::AwaitingConfirmation);
                self.sessions.upsert(sender, session).await;
                self.send(sender, &summary).await;
            }
            (Some(_), true) => {
                session.step = Some(Step::AwaitingOrder);
                self.sessions.upsert(sender, session).await;
                self.send(sender, prompts::ask_order(lang)).await;
            }
            (None, _) => {
                self.begin_order(sender, session).await;
            }
        }
    }

    /// Relays the model's free-form reply verbatim, then scans both sides of
    /// the exchange for secondary triggers.
    async fn relay_model_reply(
        &self,
        sender: &str,
        mut session: ConversationSession,
        text: &str,
        guest_signals: Signals,
    ) -> Result<(), PorteroError> {
        let lang = session.language;
        let ctx = self.prompt_context(&session);

        let reply = match self.interpreter.respond(&ctx, text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "free-form model reply failed, using fallback");
                prompts::clarification_fallback(lang).to_string()
            }
        };
        self.send(sender, &reply).await;

        let max = self.settings.max_history;
        session.push_history(Role::Guest, text, max);
        session.push_history(Role::Bot, &reply, max);

        // A menu request is honored unless the model's reply already appears
        // to contain the menu, to avoid listing it twice.
        if guest_signals.wants_menu && !self.catalog.reply_lists_menu(&reply) {
            self.send(sender, &self.catalog.render_full()).await;
        }

        // The model steering the guest toward an order also starts the flow.
        let reply_signals = signals::scan(&reply);
        if reply_signals.wants_order && session.step.is_none() {
            self.begin_order(sender, session).await;
            return Ok(());
        }

        self.sessions.upsert(sender, session).await;
        Ok(())
    }

    /// Starts the ordering flow by asking for a room number, unless a flow
    /// is already in progress.
    async fn begin_order(&self, sender: &str, mut session: ConversationSession) {
        if session.step.is_some() {
            self.sessions.upsert(sender, session).await;
            return;
        }
        let lang = session.language;
        session.step = Some(Step::AwaitingRoom);
        self.sessions.upsert(sender, session).await;
        self.send(sender, prompts::ask_room(lang)).await;
    }

    // --- Manager and button paths ---

    async fn handle_manager_command(&self, cmd: ManagerCommand) -> Result<(), PorteroError> {
        let (id, status) = match cmd {
            ManagerCommand::Confirm(id) => (id, OrderStatus::Confirmed),
            ManagerCommand::Done(id) => (id, OrderStatus::Done),
        };

        match self.orders.update_status(id, status).await {
            Ok(order) => {
                self.send(
                    &self.settings.manager_address,
                    &prompts::order_marked(id, &status.to_string()),
                )
                .await;

                if is_channel_address(order.guest_address.as_deref())
                    && let (Some(address), Some(text)) =
                        (order.guest_address.as_deref(), status_update_text(status, id))
                {
                    self.send(address, &text).await;
                }
                Ok(())
            }
            Err(PorteroError::OrderNotFound { .. }) => {
                self.send(&self.settings.manager_address, &prompts::order_not_found(id))
                    .await;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn handle_button_reply(&self, event: &InboundEvent) -> Result<(), PorteroError> {
        let Some(button_id) = event.selected_button_id.as_deref() else {
            return Ok(());
        };
        let Some(stars) = button_id.strip_prefix("star_") else {
            debug!(button_id, "ignoring unrecognized button reply");
            return Ok(());
        };
        if !matches!(stars, "1" | "2" | "3" | "4" | "5") {
            return Ok(());
        }

        // Rating arrives after the session was cleared; language falls back
        // to English when no session remains.
        let lang = self
            .sessions
            .get(&event.sender)
            .await
            .map(|s| s.language)
            .unwrap_or_default();
        self.send(&event.sender, &prompts::rating_thanks(lang, stars))
            .await;
        Ok(())
    }

    // --- Helpers ---

    fn extract_room(&self, text: &str) -> Option<String> {
        self.room_pattern
            .captures(text)
            .or_else(|| self.bare_digits_pattern.captures(text))
            .map(|caps| caps[1].to_string())
    }

    fn prompt_context(&self, session: &ConversationSession) -> PromptContext {
        PromptContext {
            hotel_name: self.settings.hotel_name.clone(),
            check_in_time: self.settings.check_in_time.clone(),
            check_out_time: self.settings.check_out_time.clone(),
            menu_json: self.catalog.to_context_json(),
            history: session
                .history()
                .iter()
                .map(|e| (e.role.as_str().to_string(), e.content.clone()))
                .collect(),
            language: session.language.code().to_string(),
        }
    }

    /// Fire-and-forget delivery: failures are logged, never propagated, so a
    /// flaky channel cannot crash the engine or roll back committed state.
    async fn send(&self, address: &str, text: &str) {
        if let Err(e) = self.channel.send_text(address, text).await {
            warn!(error = %e, address = %address, "message delivery failed");
        }
    }
}
