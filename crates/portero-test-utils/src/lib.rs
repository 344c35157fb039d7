// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Portero integration tests.
//!
//! Provides mock implementations of the channel and model seams so the
//! conversation engine can be exercised deterministically without a
//! messaging platform or an external model API.

pub mod mock_channel;
pub mod mock_model;

pub use mock_channel::{MockChannel, SentChoice, SentText};
pub use mock_model::MockModel;
