//! Spontaneous message types and per-user delivery state.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

/// How pressing a pending message is. Only the eviction policy consults
/// this; delivery itself runs in insertion order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

/// The speech act of an outbound message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Statement,
    Question,
    Suggestion,
}

/// Message lifecycle. `Pending` is the only non-terminal state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Delivered,
    Archived,
    Skipped,
    ContentRejected,
}

/// A candidate outbound utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpontaneousMessage {
    /// Unique identifier.
    pub id: Uuid,
    /// Raw content as enqueued; already filter-approved.
    pub content: String,
    /// Personality-formatted rendering, if a formatter has run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_content: Option<String>,
    /// Why this message was proposed.
    pub reason: String,
    /// Eviction-policy priority.
    pub urgency: Urgency,
    /// Speech act.
    pub kind: MessageKind,
    /// Target user; `None` broadcasts to whoever has a session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Want that motivated this message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want_id: Option<Uuid>,
    /// Lifecycle status.
    pub status: MessageStatus,
    /// When the message was enqueued.
    pub created_at: DateTime<Utc>,
    /// When the message was delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl SpontaneousMessage {
    /// The text that would go out right now: the formatted rendering when
    /// present, the raw content otherwise.
    pub fn outbound_text(&self) -> &str {
        self.formatted_content.as_deref().unwrap_or(&self.content)
    }
}

/// Parameters for enqueueing a spontaneous message.
#[derive(Debug, Clone)]
pub struct EnqueueParams {
    pub content: String,
    pub reason: String,
    pub urgency: Urgency,
    pub kind: MessageKind,
    pub user_id: Option<String>,
    pub want_id: Option<Uuid>,
}

impl EnqueueParams {
    /// New params with default urgency (`Low`) and kind (`Statement`).
    pub fn new(content: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            reason: reason.into(),
            urgency: Urgency::default(),
            kind: MessageKind::default(),
            user_id: None,
            want_id: None,
        }
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn from_want(mut self, want_id: Uuid) -> Self {
        self.want_id = Some(want_id);
        self
    }
}

/// Per-user delivery state for rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSpontaneousPrefs {
    /// Whether this user receives spontaneous messages at all.
    pub enabled: bool,
    /// Deliveries so far on `last_reset_date`.
    pub daily_count: u32,
    /// Most recent delivery to this user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_delivered_at: Option<DateTime<Utc>>,
    /// Calendar date the daily counter was last reset for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reset_date: Option<NaiveDate>,
}

impl Default for UserSpontaneousPrefs {
    fn default() -> Self {
        Self {
            enabled: true,
            daily_count: 0,
            last_delivered_at: None,
            last_reset_date: None,
        }
    }
}

/// Why delivery to a user is currently blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DeliveryBlock {
    UserDisabled,
    DailyCapReached,
    CoolingDown,
}
