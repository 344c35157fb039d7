// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order persistence for Portero.
//!
//! [`JsonFileRepository`] implements the whole-collection repository trait
//! over a single JSON file with atomic temp-then-rename saves;
//! [`OrderStore`] layers lock-serialized append/update/delete/purge
//! operations on top, shared by the conversation engine and the dashboard
//! gateway.

pub mod repository;
pub mod store;

pub use repository::JsonFileRepository;
pub use store::{OrderDraft, OrderStore};
