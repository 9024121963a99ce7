//! Want types - weighted motivational vectors.
//!
//! A want is a typed, decaying, bounded-intensity record that pulls
//! background processing toward a knowledge domain. Wants are born from
//! external signals, mutated by boost/satisfy/frustrate/action events,
//! aged by decay ticks, and die exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

/// The kind of motivation a want expresses.
///
/// Kinds serialize to snake_case for storage and audit compatibility.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WantKind {
    /// Pull toward unexplored or thin regions of the substrate.
    Curiosity,
    /// Pull toward deepening quality in an already-known domain.
    Mastery,
    /// Pull toward linking with the user or across domains.
    Connection,
    /// Pull toward producing new synthesis.
    Creation,
    /// Pull toward fixing a recurring structural problem.
    Repair,
}

/// Where a want came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WantOrigin {
    SubstrateGap,
    UserInteraction,
    DreamSynthesis,
    PainEvent,
    DecayTrigger,
}

/// Lifecycle status. The transition to `Dead` is one-way.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WantStatus {
    Active,
    Dead,
}

/// Why a want died.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    /// Intensity decayed below the death threshold.
    DecayDeath,
    /// Accumulated frustration with too little satisfaction.
    FrustrationDeath,
    /// Externally triggered, irreversible kill.
    SovereignSuppression,
}

/// Derived registry key for a want: one active want per (kind, domain).
///
/// Sovereign suppression is recorded against this key, so a suppressed
/// (kind, domain) pair can never be recreated under a fresh id.
pub fn want_key(kind: WantKind, domain: &str) -> String {
    format!("{}:{}", kind, domain)
}

/// A weighted motivational vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Want {
    /// Unique identifier.
    pub id: Uuid,
    /// The kind of motivation.
    pub kind: WantKind,
    /// Hierarchical dotted domain path, e.g. `medicine.cardiology`.
    pub domain: String,
    /// Current pull strength, always within `[0, ceiling]`.
    pub intensity: f32,
    /// Per-want maximum intensity, always at or below the hard ceiling.
    pub ceiling: f32,
    /// Intensity subtracted by each decay tick.
    pub decay_rate: f32,
    /// Where this want came from.
    pub origin: WantOrigin,
    /// What this want is about (bounded length).
    pub description: String,
    /// Count of recorded satisfaction events.
    pub satisfaction_events: u32,
    /// Count of recorded frustration events.
    pub frustration_events: u32,
    /// Timestamps of recent actions taken on behalf of this want (bounded).
    #[serde(default)]
    pub actions: Vec<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: WantStatus,
    /// Why the want died, once dead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_reason: Option<DeathReason>,
    /// When this want was created.
    pub created_at: DateTime<Utc>,
    /// Last time an action was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_acted_at: Option<DateTime<Utc>>,
    /// Last time satisfaction was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_satisfied_at: Option<DateTime<Utc>>,
    /// Last time a decay tick touched this want.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_decayed_at: Option<DateTime<Utc>>,
    /// When the want died.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub died_at: Option<DateTime<Utc>>,
}

impl Want {
    /// Derived registry key for this want.
    pub fn key(&self) -> String {
        want_key(self.kind, &self.domain)
    }

    /// Whether the want is still alive.
    pub fn is_active(&self) -> bool {
        self.status == WantStatus::Active
    }

    /// Number of recorded actions at or after `cutoff`.
    pub fn actions_since(&self, cutoff: DateTime<Utc>) -> usize {
        self.actions.iter().filter(|t| **t >= cutoff).count()
    }

    /// First dot-segment of the domain path.
    pub fn domain_root(&self) -> &str {
        self.domain.split('.').next().unwrap_or(&self.domain)
    }

    /// Whether this want's domain equals `domain` or descends from it
    /// (`medicine` matches `medicine.cardiology`).
    pub fn domain_matches(&self, domain: &str) -> bool {
        self.domain == domain
            || self
                .domain
                .strip_prefix(domain)
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// A want's standing in the priority ordering, for external consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WantPriority {
    pub id: Uuid,
    pub kind: WantKind,
    pub domain: String,
    pub intensity: f32,
}

impl From<&Want> for WantPriority {
    fn from(want: &Want) -> Self {
        Self {
            id: want.id,
            kind: want.kind,
            domain: want.domain.clone(),
            intensity: want.intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_want() -> Want {
        Want {
            id: Uuid::new_v4(),
            kind: WantKind::Curiosity,
            domain: "medicine.cardiology".to_string(),
            intensity: 0.5,
            ceiling: 0.85,
            decay_rate: 0.02,
            origin: WantOrigin::SubstrateGap,
            description: "Explore arrhythmia coverage".to_string(),
            satisfaction_events: 0,
            frustration_events: 0,
            actions: Vec::new(),
            status: WantStatus::Active,
            death_reason: None,
            created_at: Utc::now(),
            last_acted_at: None,
            last_satisfied_at: None,
            last_decayed_at: None,
            died_at: None,
        }
    }

    #[test]
    fn test_want_kind_parses_snake_case() {
        assert_eq!("curiosity".parse::<WantKind>().unwrap(), WantKind::Curiosity);
        assert_eq!("repair".parse::<WantKind>().unwrap(), WantKind::Repair);
        assert!("ambition".parse::<WantKind>().is_err());
    }

    #[test]
    fn test_want_key_derivation() {
        let want = sample_want();
        assert_eq!(want.key(), "curiosity:medicine.cardiology");
        assert_eq!(want_key(WantKind::Repair, "infra"), "repair:infra");
    }

    #[test]
    fn test_domain_matching_is_segment_aware() {
        let want = sample_want();
        assert!(want.domain_matches("medicine.cardiology"));
        assert!(want.domain_matches("medicine"));
        // Prefix without a segment boundary must not match.
        assert!(!want.domain_matches("medicine.cardio"));
        assert!(!want.domain_matches("med"));
    }

    #[test]
    fn test_domain_root() {
        let want = sample_want();
        assert_eq!(want.domain_root(), "medicine");
    }

    #[test]
    fn test_actions_since_counts_window() {
        let mut want = sample_want();
        let now = Utc::now();
        want.actions = vec![
            now - Duration::hours(3),
            now - Duration::minutes(30),
            now - Duration::minutes(5),
        ];
        assert_eq!(want.actions_since(now - Duration::hours(1)), 2);
    }

    #[test]
    fn test_want_serializes_to_snake_case() {
        let want = sample_want();
        let json = serde_json::to_string(&want).unwrap();
        assert!(json.contains("\"curiosity\""));
        assert!(json.contains("\"substrate_gap\""));
        assert!(json.contains("\"active\""));
        // Unset timestamps stay out of the payload.
        assert!(!json.contains("died_at"));
    }
}
