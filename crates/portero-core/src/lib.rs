// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Portero concierge agent.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Portero workspace. The messaging channel,
//! language model, and order repository are all consumed through traits
//! defined here.

pub mod error;
pub mod messages;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PorteroError;
pub use types::{
    AdapterType, HealthStatus, InboundEvent, MessageId, Order, OrderStatus,
};

// Re-export all adapter traits at crate root.
pub use traits::{LanguageModel, MessageChannel, OrderRepository, PluginAdapter};
