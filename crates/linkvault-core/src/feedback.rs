//! Short-lived status messages shown after each user action.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::error::Error;

/// How long a message stays visible.
pub const MESSAGE_TTL: Duration = Duration::from_secs(3);

pub const NETWORK_FAILURE: &str = "Cannot reach the LinkVault server. Is the backend running?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransientMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl TransientMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self.kind, MessageKind::Error)
    }
}

/// User-facing text for a failed action.
///
/// Transport failures get the "backend unreachable" text, invalid input shows
/// its own reason, and everything else gets the action's generic text. HTTP
/// status codes are never shown verbatim.
pub fn failure_message(error: &Error, generic: &str) -> TransientMessage {
    match error {
        _ if error.is_network() => TransientMessage::error(NETWORK_FAILURE),
        Error::InvalidInput(reason) => TransientMessage::error(reason.clone()),
        Error::FolderCycle { .. } => {
            TransientMessage::error("A folder cannot be moved inside itself.")
        }
        _ => TransientMessage::error(generic),
    }
}

/// Holds at most one message; a new message replaces the current one.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    slot: Option<(TransientMessage, Instant)>,
    ttl: Duration,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new(MESSAGE_TTL)
    }
}

impl StatusBoard {
    pub const fn new(ttl: Duration) -> Self {
        Self { slot: None, ttl }
    }

    pub fn post(&mut self, message: TransientMessage) {
        self.slot = Some((message, Instant::now() + self.ttl));
    }

    /// The visible message, or `None` once its window has elapsed.
    pub fn current(&self) -> Option<&TransientMessage> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&TransientMessage> {
        self.slot
            .as_ref()
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(message, _)| message)
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.slot.as_ref().map(|(_, expires_at)| *expires_at)
    }

    /// Drop the message if its window has elapsed; returns whether it did.
    pub fn expire(&mut self) -> bool {
        let expired = self
            .slot
            .as_ref()
            .is_some_and(|(_, expires_at)| Instant::now() >= *expires_at);
        if expired {
            self.slot = None;
        }
        expired
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
