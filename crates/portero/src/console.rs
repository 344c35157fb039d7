// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console channel: a local stdin/stdout stand-in for the real messaging
//! transport, for development and demos.
//!
//! Input conventions:
//! - `hello there` -- a text message from the default sender
//! - `@manager@c.us confirm #123` -- a text message from another address
//! - `/star 4` -- a button reply selecting `star_4` (may follow an `@addr`)
//!
//! Outbound messages are printed as `-> [address] text`.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use portero_core::types::{
    AdapterType, ChannelCapabilities, ChoicePrompt, HealthStatus, InboundEvent, MessageId,
};
use portero_core::{MessageChannel, PluginAdapter, PorteroError};

/// A stdin/stdout messaging channel.
pub struct ConsoleChannel {
    lines: Mutex<Lines<BufReader<Stdin>>>,
    default_sender: String,
    counter: Mutex<u64>,
}

impl ConsoleChannel {
    pub fn new(default_sender: &str) -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            default_sender: default_sender.to_string(),
            counter: Mutex::new(0),
        }
    }

    /// Parses one console line into an inbound event.
    fn parse_line(&self, line: &str) -> Option<InboundEvent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        // Optional `@<addr>` prefix overrides the sender.
        let (sender, rest) = match line.strip_prefix('@') {
            Some(tail) => {
                let (addr, rest) = tail.split_once(char::is_whitespace)?;
                (addr.to_string(), rest.trim())
            }
            None => (self.default_sender.clone(), line),
        };

        // `/star <n>` simulates a rating button reply.
        if let Some(n) = rest.strip_prefix("/star ") {
            let n = n.trim();
            return Some(InboundEvent::button_reply(sender, format!("star_{n}")));
        }

        Some(InboundEvent::text(sender, rest))
    }

    async fn next_id(&self) -> MessageId {
        let mut counter = self.counter.lock().await;
        *counter += 1;
        MessageId(format!("console-{counter}"))
    }
}

#[async_trait]
impl PluginAdapter for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, PorteroError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), PorteroError> {
        Ok(())
    }
}

#[async_trait]
impl MessageChannel for ConsoleChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_choices: true,
            max_message_length: None,
        }
    }

    async fn connect(&mut self) -> Result<(), PorteroError> {
        println!("console channel ready (default sender: {})", self.default_sender);
        Ok(())
    }

    async fn send_text(&self, address: &str, text: &str) -> Result<MessageId, PorteroError> {
        println!("-> [{address}] {text}");
        Ok(self.next_id().await)
    }

    async fn send_choice(
        &self,
        address: &str,
        prompt: ChoicePrompt,
    ) -> Result<MessageId, PorteroError> {
        println!("-> [{address}] {} ({})", prompt.text, prompt.title);
        for option in &prompt.options {
            println!("     [{}] {}", option.id, option.label);
        }
        println!("     {}", prompt.footer);
        Ok(self.next_id().await)
    }

    async fn next_event(&self) -> Result<InboundEvent, PorteroError> {
        let mut lines = self.lines.lock().await;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if let Some(event) = self.parse_line(&line) {
                        return Ok(event);
                    }
                }
                Ok(None) => {
                    return Err(PorteroError::Channel {
                        message: "console input closed".to_string(),
                        source: None,
                    });
                }
                Err(e) => {
                    return Err(PorteroError::Channel {
                        message: format!("console read failed: {e}"),
                        source: Some(Box::new(e)),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portero_core::types::InteractionKind;

    #[test]
    fn plain_line_uses_default_sender() {
        let channel = ConsoleChannel::new("guest-console@c.us");
        let event = channel.parse_line("hello there").unwrap();
        assert_eq!(event.sender, "guest-console@c.us");
        assert_eq!(event.body, "hello there");
        assert_eq!(event.interaction, InteractionKind::Text);
    }

    #[test]
    fn at_prefix_overrides_sender() {
        let channel = ConsoleChannel::new("guest-console@c.us");
        let event = channel.parse_line("@manager@c.us confirm #123").unwrap();
        assert_eq!(event.sender, "manager@c.us");
        assert_eq!(event.body, "confirm #123");
    }

    #[test]
    fn star_command_becomes_button_reply() {
        let channel = ConsoleChannel::new("guest-console@c.us");
        let event = channel.parse_line("/star 4").unwrap();
        assert_eq!(event.interaction, InteractionKind::ButtonReply);
        assert_eq!(event.selected_button_id.as_deref(), Some("star_4"));

        let event = channel.parse_line("@guest-2@c.us /star 1").unwrap();
        assert_eq!(event.sender, "guest-2@c.us");
        assert_eq!(event.selected_button_id.as_deref(), Some("star_1"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let channel = ConsoleChannel::new("guest-console@c.us");
        assert!(channel.parse_line("   ").is_none());
        assert!(channel.parse_line("").is_none());
    }
}
