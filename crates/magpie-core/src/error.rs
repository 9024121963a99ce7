//! Error types for motivation engine operations.
//!
//! Expected validation failures (bad want kind, forbidden category, rate
//! gates, full queue) are ordinary variants here, returned from the owning
//! component rather than panicking. Each variant maps to a stable string
//! code via [`MotivationError::code`] for callers that log or route on
//! codes instead of matching variants.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias for motivation engine operations.
pub type MotivationResult<T> = Result<T, MotivationError>;

/// Main error type for all motivation engine operations.
#[derive(Error, Debug)]
pub enum MotivationError {
    /// A want kind name did not parse to a known kind.
    #[error("Unknown want kind: '{name}'")]
    InvalidWantType { name: String },

    /// Want domain or description contained a forbidden category substring.
    #[error("Forbidden category '{category}' in want domain or description")]
    ForbiddenCategory { category: String },

    /// The derived want key was sovereign-suppressed and can never be recreated.
    #[error("Want key '{key}' is permanently suppressed")]
    PermanentlySuppressed { key: String },

    /// No want with this id exists in the registry or the dead list.
    #[error("Want not found: {id}")]
    WantNotFound { id: Uuid },

    /// The want exists but is dead; the operation requires an active want.
    #[error("Want is not active: {id}")]
    WantNotActive { id: Uuid },

    /// A humor style name did not parse to a known style.
    #[error("Unknown humor style: '{name}'")]
    InvalidStyle { name: String },

    /// Outbound message content was empty.
    #[error("Message content is empty")]
    EmptyContent,

    /// Outbound message content failed the safety filter.
    #[error("Message content rejected: {reason}")]
    ContentRejected { reason: String },

    /// The queue is at capacity and held no evictable low-urgency entry.
    #[error("Message queue is full")]
    QueueFull,

    /// JSON serialization error (snapshot export/restore).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Ticker scheduler error.
    #[error("Scheduler error: {0}")]
    Scheduler(String),

    /// An injected format/deliver hook failed.
    #[error("Hook error: {0}")]
    Hook(String),
}

impl MotivationError {
    /// Stable string code for this error, suitable for logs and wire DTOs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidWantType { .. } => "invalid_want_type",
            Self::ForbiddenCategory { .. } => "forbidden_category",
            Self::PermanentlySuppressed { .. } => "permanently_suppressed",
            Self::WantNotFound { .. } => "want_not_found",
            Self::WantNotActive { .. } => "want_not_active",
            Self::InvalidStyle { .. } => "invalid_style",
            Self::EmptyContent => "empty_content",
            Self::ContentRejected { .. } => "content_rejected",
            Self::QueueFull => "queue_full",
            Self::Serialization(_) => "serialization_error",
            Self::Scheduler(_) => "scheduler_error",
            Self::Hook(_) => "hook_error",
        }
    }

    /// Create a scheduler error.
    pub fn scheduler(message: impl Into<String>) -> Self {
        Self::Scheduler(message.into())
    }

    /// Create a hook error.
    pub fn hook(message: impl Into<String>) -> Self {
        Self::Hook(message.into())
    }

    /// Whether this error is an expected validation denial rather than an
    /// infrastructure failure.
    pub fn is_denial(&self) -> bool {
        !matches!(
            self,
            Self::Serialization(_) | Self::Scheduler(_) | Self::Hook(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            MotivationError::InvalidWantType {
                name: "ambition".into()
            }
            .code(),
            "invalid_want_type"
        );
        assert_eq!(MotivationError::QueueFull.code(), "queue_full");
        assert_eq!(MotivationError::EmptyContent.code(), "empty_content");
    }

    #[test]
    fn test_denial_classification() {
        assert!(MotivationError::QueueFull.is_denial());
        assert!(!MotivationError::scheduler("tick failed").is_denial());
    }

    #[test]
    fn test_display_contains_context() {
        let err = MotivationError::ForbiddenCategory {
            category: "surveillance".into(),
        };
        assert!(err.to_string().contains("surveillance"));
    }
}
