//! Mutation outcomes, used purely for operator notification.

use std::fmt;

/// Which mutation kind just settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Added,
    Edited,
    Deleted,
    Banned,
    Unbanned,
}

impl ActionKind {
    /// Past-tense label for notification text.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Added => "added",
            ActionKind::Edited => "edited",
            ActionKind::Deleted => "deleted",
            ActionKind::Banned => "banned",
            ActionKind::Unbanned => "unbanned",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The settled result of one mutation. Carries no record data; it exists
/// only to drive ephemeral notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Which mutation settled.
    pub action: ActionKind,
    /// Whether the remote call succeeded.
    pub success: bool,
}

impl ActionOutcome {
    /// A successful outcome.
    pub fn succeeded(action: ActionKind) -> Self {
        Self {
            action,
            success: true,
        }
    }

    /// A failed outcome.
    pub fn failed(action: ActionKind) -> Self {
        Self {
            action,
            success: false,
        }
    }
}
