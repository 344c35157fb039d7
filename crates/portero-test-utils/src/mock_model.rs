// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model for deterministic testing.
//!
//! `MockModel` implements `LanguageModel` with pre-configured responses,
//! enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use portero_core::types::{AdapterType, HealthStatus};
use portero_core::{LanguageModel, PluginAdapter, PorteroError};

/// A mock language model that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a
/// default "mock reply" text is returned. A failure mode makes every call
/// error instead, for testing interpretation-failure fallbacks.
pub struct MockModel {
    responses: Arc<Mutex<VecDeque<String>>>,
    fail_calls: Arc<Mutex<bool>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockModel {
    /// Create a new mock model with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fail_calls: Arc::new(Mutex::new(false)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock model pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            fail_calls: Arc::new(Mutex::new(false)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Make every subsequent call fail with a model error.
    pub async fn set_fail_calls(&self, fail: bool) {
        *self.fail_calls.lock().await = fail;
    }

    /// Every prompt received so far, in order.
    pub async fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string())
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockModel {
    fn name(&self) -> &str {
        "mock-model"
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
impl LanguageModel for MockModel {
    async fn generate(&self, prompt: &str) -> Result<String, PorteroError> {
        if *self.fail_calls.lock().await {
            return Err(PorteroError::Model {
                message: "mock model failure".to_string(),
                source: None,
            });
        }
        self.prompts.lock().await.push(prompt.to_string());
        Ok(self.next_response().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let model = MockModel::new();
        assert_eq!(model.generate("anything").await.unwrap(), "mock reply");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let model = MockModel::with_responses(vec!["first".into(), "second".into()]);
        assert_eq!(model.generate("a").await.unwrap(), "first");
        assert_eq!(model.generate("b").await.unwrap(), "second");
        // Queue exhausted, falls back to default.
        assert_eq!(model.generate("c").await.unwrap(), "mock reply");
    }

    #[tokio::test]
    async fn failure_mode_errors_every_call() {
        let model = MockModel::with_responses(vec!["unused".into()]);
        model.set_fail_calls(true).await;
        assert!(matches!(
            model.generate("x").await,
            Err(PorteroError::Model { .. })
        ));
    }

    #[tokio::test]
    async fn prompts_are_recorded() {
        let model = MockModel::new();
        model.generate("first prompt").await.unwrap();
        model.generate("second prompt").await.unwrap();
        assert_eq!(
            model.received_prompts().await,
            ["first prompt", "second prompt"]
        );
    }
}
