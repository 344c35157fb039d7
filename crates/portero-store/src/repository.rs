// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-file implementation of the OrderRepository trait.
//!
//! The collection is persisted as one pretty-printed JSON array. Every save
//! writes to a temp file in the same directory and renames it over the
//! target, so a torn file is never observable.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use portero_core::types::{AdapterType, HealthStatus, Order};
use portero_core::{OrderRepository, PluginAdapter, PorteroError};

/// Order repository backed by a single JSON file.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Creates a repository at the given path. The file is created lazily on
    /// the first save; a missing file loads as an empty collection.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_collection(&self) -> Result<Vec<Order>, PorteroError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(PorteroError::Store { source: Box::new(e) }),
        };

        serde_json::from_str(&raw).map_err(|e| PorteroError::Store {
            source: Box::new(e),
        })
    }

    fn write_collection(&self, orders: &[Order]) -> Result<(), PorteroError> {
        let json = serde_json::to_string_pretty(orders).map_err(|e| PorteroError::Store {
            source: Box::new(e),
        })?;

        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir),
            None => tempfile::NamedTempFile::new_in("."),
        }
        .map_err(|e| PorteroError::Store { source: Box::new(e) })?;

        tmp.write_all(json.as_bytes())
            .map_err(|e| PorteroError::Store { source: Box::new(e) })?;
        tmp.persist(&self.path)
            .map_err(|e| PorteroError::Store { source: Box::new(e.error) })?;

        debug!(path = %self.path.display(), count = orders.len(), "order collection saved");
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for JsonFileRepository {
    fn name(&self) -> &str {
        "json-file"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, PorteroError> {
        match self.read_collection() {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }

    async fn shutdown(&self) -> Result<(), PorteroError> {
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for JsonFileRepository {
    async fn load_all(&self) -> Result<Vec<Order>, PorteroError> {
        self.read_collection()
    }

    async fn save_all(&self, orders: &[Order]) -> Result<(), PorteroError> {
        self.write_collection(orders)
    }
}
