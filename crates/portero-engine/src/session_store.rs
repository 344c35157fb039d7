// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session table keyed by guest channel address.
//!
//! An explicit component with a small capability surface (get, upsert,
//! remove, sweep) injected into the engine, rather than ambient global
//! state. Idle sessions are swept on a timer so the table cannot grow
//! without bound.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use crate::session::ConversationSession;

/// Table of live conversation sessions.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, ConversationSession>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Returns a snapshot of the session for this address, if one exists.
    pub async fn get(&self, address: &str) -> Option<ConversationSession> {
        self.sessions.lock().await.get(address).cloned()
    }

    /// Inserts or replaces the session for this address.
    pub async fn upsert(&self, address: &str, session: ConversationSession) {
        self.sessions
            .lock()
            .await
            .insert(address.to_string(), session);
    }

    /// Removes the session for this address. Returns whether one existed.
    pub async fn remove(&self, address: &str) -> bool {
        self.sessions.lock().await.remove(address).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Drops every session idle for longer than the configured timeout,
    /// returning how many were removed.
    pub async fn sweep_idle(&self) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.idle_for() < self.idle_timeout);
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed, remaining = sessions.len(), "idle sessions swept");
        }
        removed
    }
}
