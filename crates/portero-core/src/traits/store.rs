// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Order repository trait over the persisted order collection.

use async_trait::async_trait;

use crate::error::PorteroError;
use crate::traits::adapter::PluginAdapter;
use crate::types::Order;

/// Durable storage of the full order collection.
///
/// The repository operates on the whole collection at once -- there is no
/// partial-record API in this design. Callers that mutate must serialize
/// their read-modify-write cycles; the repository only guarantees that each
/// `save_all` lands atomically (no torn file is ever observable).
#[async_trait]
pub trait OrderRepository: PluginAdapter {
    /// Loads the full order collection. A missing backing file loads as empty.
    async fn load_all(&self) -> Result<Vec<Order>, PorteroError>;

    /// Replaces the full order collection atomically.
    async fn save_all(&self, orders: &[Order]) -> Result<(), PorteroError>;
}
