// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for Portero's external collaborators.

pub mod adapter;
pub mod channel;
pub mod model;
pub mod store;

pub use adapter::PluginAdapter;
pub use channel::MessageChannel;
pub use model::LanguageModel;
pub use store::OrderRepository;
