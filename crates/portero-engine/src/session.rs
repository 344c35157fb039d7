// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-guest conversational state.
//!
//! A session exists only while an exchange is in flight: it is created
//! lazily on the first message from an unseen address and removed on reset
//! or successful order placement. State is process-local and lost on
//! restart, which is an accepted boundary of this design.

use std::time::{Duration, Instant};

/// Where a guest currently is in the ordering flow.
///
/// The absence of a step (or of the whole session) is both the initial and
/// the post-completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Waiting for a 3-4 digit room number.
    AwaitingRoom,
    /// Waiting for order items.
    AwaitingOrder,
    /// Waiting for a yes/no confirmation of the rendered summary.
    AwaitingConfirmation,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::AwaitingRoom => write!(f, "awaiting_room"),
            Step::AwaitingOrder => write!(f, "awaiting_order"),
            Step::AwaitingConfirmation => write!(f, "awaiting_confirmation"),
        }
    }
}

/// Session language. Sticky once switched to Nepali.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ne,
}

impl Language {
    /// Two-letter code used in model context.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ne => "ne",
        }
    }
}

/// Who authored a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Bot,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Bot => "bot",
        }
    }
}

/// One chat history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// Mutable per-guest conversational state.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    /// Current ordering step; `None` outside the ordering flow.
    pub step: Option<Step>,
    /// Session language, sticky once set to Nepali.
    pub language: Language,
    /// Room number, set once a valid token is recognized.
    pub room: Option<String>,
    /// Rendered order lines accumulated so far.
    pub items: Vec<String>,
    /// Bounded chat history for model context, oldest first.
    history: Vec<HistoryEntry>,
    /// Last activity, for idle expiry.
    last_active: Instant,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            step: None,
            language: Language::default(),
            room: None,
            items: Vec::new(),
            history: Vec::new(),
            last_active: Instant::now(),
        }
    }

    /// Appends a history entry, evicting the oldest past `max_history`.
    pub fn push_history(&mut self, role: Role, content: &str, max_history: usize) {
        self.history.push(HistoryEntry {
            role,
            content: content.to_string(),
        });
        while self.history.len() > max_history {
            self.history.remove(0);
        }
    }

    /// Chat history, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Marks the session active now.
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    /// How long the session has been inactive.
    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_no_step_and_english() {
        let session = ConversationSession::new();
        assert!(session.step.is_none());
        assert_eq!(session.language, Language::En);
        assert!(session.room.is_none());
        assert!(session.items.is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn history_is_bounded_oldest_evicted_first() {
        let mut session = ConversationSession::new();
        for i in 0..5 {
            session.push_history(Role::Guest, &format!("msg {i}"), 3);
        }
        let contents: Vec<&str> = session
            .history()
            .iter()
            .map(|e| e.content.as_str())
            .collect();
        assert_eq!(contents, ["msg 2", "msg 3", "msg 4"]);
    }

    #[test]
    fn step_display_forms() {
        assert_eq!(Step::AwaitingRoom.to_string(), "awaiting_room");
        assert_eq!(Step::AwaitingOrder.to_string(), "awaiting_order");
        assert_eq!(Step::AwaitingConfirmation.to_string(), "awaiting_confirmation");
    }

    #[test]
    fn language_codes() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::Ne.code(), "ne");
    }
}
