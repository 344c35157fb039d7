// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messaging channel for deterministic testing.
//!
//! `MockChannel` implements `MessageChannel` with injectable inbound events
//! and captured outbound texts/choice prompts for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use portero_core::types::{
    AdapterType, ChannelCapabilities, ChoicePrompt, HealthStatus, InboundEvent, MessageId,
};
use portero_core::{MessageChannel, PluginAdapter, PorteroError};

/// A text message captured by [`MockChannel::send_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentText {
    pub address: String,
    pub text: String,
}

/// A choice prompt captured by [`MockChannel::send_choice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentChoice {
    pub address: String,
    pub prompt: ChoicePrompt,
}

/// A mock messaging channel for testing.
///
/// Provides three queues:
/// - **inbound**: Events injected via `inject_event()` are returned by `next_event()`
/// - **texts**: Messages passed to `send_text()` are captured and retrievable
/// - **choices**: Prompts passed to `send_choice()` are captured and retrievable
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<InboundEvent>>>,
    texts: Arc<Mutex<Vec<SentText>>>,
    choices: Arc<Mutex<Vec<SentChoice>>>,
    notify: Arc<Notify>,
    /// When true, every send returns a channel error (for notification-failure tests).
    fail_sends: Arc<Mutex<bool>>,
    counter: Arc<Mutex<u64>>,
}

impl MockChannel {
    /// Create a new mock channel with empty queues.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            texts: Arc::new(Mutex::new(Vec::new())),
            choices: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
            fail_sends: Arc::new(Mutex::new(false)),
            counter: Arc::new(Mutex::new(0)),
        }
    }

    /// Inject an inbound event into the receive queue.
    pub async fn inject_event(&self, event: InboundEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// All texts sent through `send_text()`, in order.
    pub async fn sent_texts(&self) -> Vec<SentText> {
        self.texts.lock().await.clone()
    }

    /// All texts sent to one address, in order.
    pub async fn texts_to(&self, address: &str) -> Vec<String> {
        self.texts
            .lock()
            .await
            .iter()
            .filter(|t| t.address == address)
            .map(|t| t.text.clone())
            .collect()
    }

    /// All choice prompts sent through `send_choice()`, in order.
    pub async fn sent_choices(&self) -> Vec<SentChoice> {
        self.choices.lock().await.clone()
    }

    /// Clear all captured outbound traffic.
    pub async fn clear_sent(&self) {
        self.texts.lock().await.clear();
        self.choices.lock().await.clear();
    }

    /// Make every subsequent send fail with a channel error.
    pub async fn set_fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().await = fail;
    }

    async fn next_id(&self) -> Result<MessageId, PorteroError> {
        if *self.fail_sends.lock().await {
            return Err(PorteroError::Channel {
                message: "mock channel delivery failure".to_string(),
                source: None,
            });
        }
        let mut counter = self.counter.lock().await;
        *counter += 1;
        Ok(MessageId(format!("mock-msg-{counter}")))
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
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
impl MessageChannel for MockChannel {
    fn capabilities(&self) -> ChannelCapabilities {
        ChannelCapabilities {
            supports_choices: true,
            max_message_length: None,
        }
    }

    async fn connect(&mut self) -> Result<(), PorteroError> {
        Ok(())
    }

    async fn send_text(&self, address: &str, text: &str) -> Result<MessageId, PorteroError> {
        let id = self.next_id().await?;
        self.texts.lock().await.push(SentText {
            address: address.to_string(),
            text: text.to_string(),
        });
        Ok(id)
    }

    async fn send_choice(
        &self,
        address: &str,
        prompt: ChoicePrompt,
    ) -> Result<MessageId, PorteroError> {
        let id = self.next_id().await?;
        self.choices.lock().await.push(SentChoice {
            address: address.to_string(),
            prompt,
        });
        Ok(id)
    }

    async fn next_event(&self) -> Result<InboundEvent, PorteroError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            // Wait for notification that a new event was injected.
            self.notify.notified().await;
        }
    }
}
