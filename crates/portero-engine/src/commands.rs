// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of administrative commands sent by the manager over chat.

use regex::Regex;
use std::sync::OnceLock;

/// An administrative order-status command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerCommand {
    /// `confirm #<id>` -- mark the order Confirmed.
    Confirm(i64),
    /// `done #<id>` -- mark the order Done.
    Done(i64),
}

fn confirm_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^confirm\s+#(\d+)$").unwrap())
}

fn done_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^done\s+#(\d+)$").unwrap())
}

impl ManagerCommand {
    /// Parses a message into a command, case-insensitively.
    ///
    /// Returns `None` for anything that is not an exact command shape, so a
    /// manager's ordinary conversation still flows through the normal path.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(caps) = confirm_re().captures(text) {
            return caps[1].parse().ok().map(ManagerCommand::Confirm);
        }
        if let Some(caps) = done_re().captures(text) {
            return caps[1].parse().ok().map(ManagerCommand::Done);
        }
        None
    }

    /// The order id the command targets.
    pub fn order_id(&self) -> i64 {
        match self {
            ManagerCommand::Confirm(id) | ManagerCommand::Done(id) => *id,
        }
    }
}
