//! Bounded audit trail for want lifecycle mutations.
//!
//! Every mutating engine operation appends one structured entry here. The
//! log is the only source of truth for "why did intensity change".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use strum::{Display, IntoStaticStr};
use uuid::Uuid;

/// What a mutating operation did.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    WantCreated,
    WantBoosted,
    SatisfactionRecorded,
    FrustrationRecorded,
    ActionRecorded,
    WantDecayed,
    CeilingReduced,
    WantKilled,
    WantSuppressed,
}

/// One audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub want_id: Uuid,
    /// Operation-specific detail payload.
    pub details: serde_json::Value,
}

/// Append-only, bounded audit log. Oldest entries are evicted at capacity.
#[derive(Debug)]
pub struct AuditLog {
    entries: VecDeque<AuditEntry>,
    cap: usize,
}

impl AuditLog {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cap,
        }
    }

    /// Append an entry, evicting the oldest if at capacity.
    pub fn record(&mut self, entry: AuditEntry) {
        if self.entries.len() >= self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The most recent `limit` entries in chronological order.
    pub fn recent(&self, limit: usize) -> Vec<&AuditEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(action: AuditAction, n: i64) -> AuditEntry {
        AuditEntry {
            timestamp: Utc::now(),
            action,
            want_id: Uuid::new_v4(),
            details: json!({ "n": n }),
        }
    }

    #[test]
    fn test_audit_log_bounded() {
        let mut log = AuditLog::new(3);
        for n in 0..5 {
            log.record(entry(AuditAction::WantBoosted, n));
        }
        assert_eq!(log.len(), 3);
        // Oldest two were evicted.
        assert_eq!(log.iter().next().unwrap().details["n"], 2);
    }

    #[test]
    fn test_recent_returns_chronological_tail() {
        let mut log = AuditLog::new(10);
        for n in 0..6 {
            log.record(entry(AuditAction::WantDecayed, n));
        }
        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].details["n"], 4);
        assert_eq!(recent[1].details["n"], 5);
    }

    #[test]
    fn test_action_serializes_snake_case() {
        let json = serde_json::to_string(&AuditAction::CeilingReduced).unwrap();
        assert_eq!(json, "\"ceiling_reduced\"");
    }
}
