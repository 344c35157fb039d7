// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Menu catalog and deterministic order-item matching.
//!
//! [`MenuCatalog`] is the static lookup of category -> priced items used for
//! matching and full-menu rendering; [`ItemMatcher`] extracts ordered items
//! (with quantity and computed subtotal) from free-form guest text against it.

pub mod catalog;
pub mod matcher;

pub use catalog::{MenuCatalog, MenuItem, MenuSection};
pub use matcher::{ItemMatcher, MatchOutcome, OrderLine};
