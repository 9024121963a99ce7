//! Injected collaborators for the spontaneous message queue.
//!
//! The queue never talks to a model or a transport itself; the caller
//! supplies these hooks. Hook failures are transient: the message stays
//! queued and the next tick retries it.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::MotivationResult;
use crate::types::message::SpontaneousMessage;

/// Literal a formatter returns to decline a message. Treated the same as
/// an empty or absent result: the message is terminally skipped.
pub const SKIP_SENTINEL: &str = "[SKIP]";

/// Renders a message in the current communication style before delivery.
///
/// Implementations typically close over the personality profile. Returning
/// `Ok(None)`, an empty string, or [`SKIP_SENTINEL`] skips the message;
/// returning an error leaves it queued for the next tick.
#[async_trait]
pub trait MessageFormatter: Send + Sync {
    async fn format(&self, message: &SpontaneousMessage) -> MotivationResult<Option<String>>;
}

/// Hands a filter-approved message to the outside transport.
///
/// An error leaves the message queued for the next tick (at-least-once).
#[async_trait]
pub trait MessageDeliverer: Send + Sync {
    async fn deliver(&self, message: &SpontaneousMessage) -> MotivationResult<()>;
}

/// Supplies the set of users with a live session, polled once per tick.
pub trait SessionProvider: Send + Sync {
    fn active_sessions(&self) -> HashSet<String>;
}

impl SessionProvider for HashSet<String> {
    fn active_sessions(&self) -> HashSet<String> {
        self.clone()
    }
}
