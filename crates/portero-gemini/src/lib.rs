// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini language-model adapter for Portero.
//!
//! Implements the [`portero_core::LanguageModel`] seam over the Gemini
//! `generateContent` HTTP API with authentication and transient-error retry.

pub mod client;
pub mod types;

pub use client::GeminiModel;
