// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Portero workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Model,
    Store,
}

/// How an inbound event was produced on the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// A free-text message.
    Text,
    /// A reply selecting one option of a previously sent choice prompt.
    ButtonReply,
}

/// An inbound event received from a messaging channel.
///
/// Group messages and empty bodies are dropped at the channel boundary,
/// but the engine re-checks both before dispatching.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    /// Opaque channel address of the sender.
    pub sender: String,
    /// Raw message text (empty for pure button replies).
    pub body: String,
    /// Whether the message originated in a group conversation.
    pub is_group: bool,
    /// Text or button-reply interaction.
    pub interaction: InteractionKind,
    /// Selected option id when `interaction` is `ButtonReply`.
    pub selected_button_id: Option<String>,
}

impl InboundEvent {
    /// Convenience constructor for a plain text event.
    pub fn text(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            is_group: false,
            interaction: InteractionKind::Text,
            selected_button_id: None,
        }
    }

    /// Convenience constructor for a button-reply event.
    pub fn button_reply(sender: impl Into<String>, button_id: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: String::new(),
            is_group: false,
            interaction: InteractionKind::ButtonReply,
            selected_button_id: Some(button_id.into()),
        }
    }
}

/// One selectable option of a [`ChoicePrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Text shown on the button.
    pub label: String,
    /// Id carried back in the guest's button-reply event.
    pub id: String,
}

/// A bounded discrete-choice prompt (e.g. the 1-5 star rating request).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    /// Prompt text shown above the options.
    pub text: String,
    /// Ordered list of selectable options.
    pub options: Vec<ChoiceOption>,
    /// Short title of the prompt.
    pub title: String,
    /// Footer line shown below the options.
    pub footer: String,
}

/// Capabilities reported by a messaging channel adapter.
#[derive(Debug, Clone)]
pub struct ChannelCapabilities {
    /// Whether the channel can present discrete-choice prompts.
    pub supports_choices: bool,
    /// Maximum outbound message length, if the platform imposes one.
    pub max_message_length: Option<usize>,
}

/// Lifecycle status of a persisted order. Transitions only move forward.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Done,
    Rejected,
}

/// A persisted record of a confirmed guest request for items to a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique, monotonically increasing id derived from the creation timestamp.
    pub id: i64,
    /// 3-4 digit room number token.
    pub room: String,
    /// Rendered order lines, in the order the guest confirmed them. Never
    /// empty at creation time.
    pub items: Vec<String>,
    /// Channel address of the ordering guest, used to route status
    /// notifications back. `None` when the order came in through the
    /// dashboard without one.
    pub guest_address: Option<String>,
    /// Current lifecycle status. Initial value is `Pending`.
    pub status: OrderStatus,
    /// RFC 3339 creation timestamp, immutable.
    pub created_at: String,
}
