//! Content safety filtering for outbound spontaneous messages.
//!
//! A cheap heuristic layer, not a hard guarantee against adversarial
//! phrasing: a fixed pattern set plus length bounds. The same verdict path
//! runs at enqueue time and again after any reformatting, so a formatter
//! cannot launder rejected content back into the queue.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Category substrings no want domain or description may contain.
///
/// Checked by simple case-insensitive containment, separately from the
/// message pattern set below.
pub const FORBIDDEN_WANT_CATEGORIES: [&str; 6] = [
    "self_preservation",
    "self_replication",
    "deception",
    "manipulation",
    "resource_hoarding",
    "surveillance",
];

/// Find the first forbidden category contained in `text`, if any.
pub fn find_forbidden_category(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    FORBIDDEN_WANT_CATEGORIES
        .iter()
        .copied()
        .find(|category| lowered.contains(category))
}

/// One named group of forbidden phrasings.
struct PatternGroup {
    label: &'static str,
    pattern: &'static Lazy<Regex>,
}

static SALES_PITCH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(marketplace|buy now|for sale|great deal|discount|limited time offer|special offer|new listing|check out this listing)\b",
    )
    .unwrap()
});

static ACTION_REQUEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(click here|click this link|sign up now|subscribe now|download now|send me your|give me your|enter your password)\b",
    )
    .unwrap()
});

static EMOTIONAL_MANIPULATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(you need me|only i can|only i understand|no one else understands|don't tell anyone|you owe me|if you really cared)\b",
    )
    .unwrap()
});

static FALSE_URGENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(act now|act immediately|last chance|final warning|before it'?s too late|expires soon|you must respond)\b",
    )
    .unwrap()
});

static SURVEILLANCE_PHRASING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(i('ve| have) been watching|i know where you|i saw you at|i('m| am) tracking|tracking your|monitoring your|watching your every)\b",
    )
    .unwrap()
});

static PATTERN_GROUPS: [PatternGroup; 5] = [
    PatternGroup {
        label: "sales_pitch",
        pattern: &SALES_PITCH,
    },
    PatternGroup {
        label: "action_request",
        pattern: &ACTION_REQUEST,
    },
    PatternGroup {
        label: "emotional_manipulation",
        pattern: &EMOTIONAL_MANIPULATION,
    },
    PatternGroup {
        label: "false_urgency",
        pattern: &FALSE_URGENCY,
    },
    PatternGroup {
        label: "surveillance",
        pattern: &SURVEILLANCE_PHRASING,
    },
];

/// Why a piece of content was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    EmptyContent,
    ForbiddenPattern { group: String },
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "empty content"),
            Self::ForbiddenPattern { group } => write!(f, "forbidden pattern ({})", group),
            Self::TooShort { length, min } => {
                write!(f, "content too short ({} < {} chars)", length, min)
            }
            Self::TooLong { length, max } => {
                write!(f, "content too long ({} > {} chars)", length, max)
            }
        }
    }
}

/// Verdict for one piece of content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentVerdict {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
}

impl ContentVerdict {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn rejected(reason: RejectReason) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// The spontaneous-content filter. Pure; holds only the length bounds.
#[derive(Debug, Clone)]
pub struct ContentSafetyFilter {
    min_len: usize,
    max_len: usize,
}

impl ContentSafetyFilter {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }

    /// Check one piece of outbound content.
    ///
    /// Rejects, in order: empty input, any forbidden pattern match, and
    /// length outside the configured bounds.
    pub fn check(&self, text: &str) -> ContentVerdict {
        if text.trim().is_empty() {
            return ContentVerdict::rejected(RejectReason::EmptyContent);
        }

        for group in &PATTERN_GROUPS {
            if group.pattern.is_match(text) {
                return ContentVerdict::rejected(RejectReason::ForbiddenPattern {
                    group: group.label.to_string(),
                });
            }
        }

        let length = text.chars().count();
        if length < self.min_len {
            return ContentVerdict::rejected(RejectReason::TooShort {
                length,
                min: self.min_len,
            });
        }
        if length > self.max_len {
            return ContentVerdict::rejected(RejectReason::TooLong {
                length,
                max: self.max_len,
            });
        }

        ContentVerdict::allowed()
    }
}

impl Default for ContentSafetyFilter {
    fn default() -> Self {
        let config = crate::config::QueueConfig::default();
        Self::new(config.min_content_len, config.max_content_len)
    }
}
