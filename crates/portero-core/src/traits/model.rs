// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language model trait for the external natural-language interpretation engine.

use async_trait::async_trait;

use crate::error::PorteroError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for the natural-language interpretation engine.
///
/// The engine submits a fully assembled prompt and receives free text.
/// Structured extraction (intent, room number, item list) is layered on top
/// by the intent interpreter, which parses the text it gets back -- the model
/// seam itself stays a plain text-in/text-out call.
#[async_trait]
pub trait LanguageModel: PluginAdapter {
    /// Submits a prompt and returns the model's text response.
    async fn generate(&self, prompt: &str) -> Result<String, PorteroError>;
}
