// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard REST API for Portero.
//!
//! A peer of the conversation engine operating on the same shared
//! [`portero_store::OrderStore`]: order creation, listing, status
//! transitions, deletion, and bulk purge of completed orders.

pub mod handlers;
pub mod server;

pub use handlers::GatewayState;
pub use server::{router, start_server, ServerConfig};
