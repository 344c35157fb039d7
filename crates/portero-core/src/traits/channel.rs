// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Messaging channel trait for the platform the guests converse on.

use async_trait::async_trait;

use crate::error::PorteroError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChannelCapabilities, ChoicePrompt, InboundEvent, MessageId};

/// Adapter for the bidirectional messaging transport.
///
/// The transport itself (connecting, authenticating, session tokens) is an
/// external collaborator; the engine only needs delivery and event receipt.
#[async_trait]
pub trait MessageChannel: PluginAdapter {
    /// Returns the capabilities supported by this channel.
    fn capabilities(&self) -> ChannelCapabilities;

    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), PorteroError>;

    /// Sends a plain text message to the given address.
    ///
    /// Delivery is fire-and-forget from the engine's perspective: callers on
    /// notification paths catch and log failures rather than propagating them.
    async fn send_text(&self, address: &str, text: &str) -> Result<MessageId, PorteroError>;

    /// Presents a bounded discrete choice (e.g. a star rating). The guest's
    /// selection arrives later as an [`InboundEvent`] carrying the chosen id.
    async fn send_choice(
        &self,
        address: &str,
        prompt: ChoicePrompt,
    ) -> Result<MessageId, PorteroError>;

    /// Receives the next inbound event from the channel.
    async fn next_event(&self) -> Result<InboundEvent, PorteroError>;
}
