//! Inbound signal records and external-collaborator types.
//!
//! These are the typed forms of what the outside world hands the
//! integration layer: substrate gap reports, user-engagement readings,
//! dream-synthesis results, recurring-error reports, scheduler goals, and
//! the background task vocabulary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use super::want::WantKind;

/// What is missing where a substrate gap was found.
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
pub enum GapKind {
    /// A region of the substrate is thin or absent.
    Coverage,
    /// Existing material is shallow or of poor quality.
    Quality,
    /// Related material exists but is not linked.
    Connection,
    /// The substrate's structure itself is broken.
    Structural,
}

impl GapKind {
    /// The want kind a gap of this kind generates.
    pub fn want_kind(self) -> WantKind {
        match self {
            GapKind::Coverage => WantKind::Curiosity,
            GapKind::Quality => WantKind::Mastery,
            GapKind::Connection => WantKind::Connection,
            GapKind::Structural => WantKind::Repair,
        }
    }
}

/// A knowledge gap detected in the substrate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapSignal {
    /// Domain where the gap sits.
    pub domain: String,
    /// What is missing.
    pub kind: GapKind,
    /// How bad the gap is, in `[0, 1]`.
    pub severity: f32,
    /// Free-text detail for the generated want description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A reading of user engagement with a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionSignal {
    /// Domain the user engaged with.
    pub domain: String,
    /// Engagement strength, in `[0, 1]`.
    pub engagement: f32,
    /// Whether the user has returned to this domain repeatedly.
    pub repeated: bool,
}

/// A cross-domain synthesis produced by background dreaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DreamSignal {
    /// The domains the synthesis spanned.
    pub domains: Vec<String>,
    /// What the synthesis found.
    pub insight: String,
}

impl DreamSignal {
    /// The joined domain path the generated want is filed under.
    pub fn joined_domain(&self) -> String {
        self.domains.join(".")
    }
}

/// A recurring error or structural failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PainSignal {
    /// Domain where the failure recurs.
    pub domain: String,
    /// How many times the failure has recurred.
    pub recurrence: u32,
    /// What keeps going wrong.
    pub description: String,
}

/// A goal record from the outside scheduler, subject to amplification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalGoal {
    pub domain: String,
    pub priority: f32,
}

/// Background job classes the subconscious selector chooses between.
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
pub enum TaskKind {
    /// Autonomous substrate generation.
    Autogen,
    /// Refinement of existing material.
    Evolution,
    /// Cross-domain dreaming.
    Dream,
    /// Deliberate synthesis.
    Synthesis,
}

impl TaskKind {
    /// The task a want of the given kind pulls toward.
    pub fn for_want(kind: WantKind) -> TaskKind {
        match kind {
            WantKind::Curiosity => TaskKind::Autogen,
            WantKind::Mastery => TaskKind::Evolution,
            WantKind::Connection => TaskKind::Dream,
            WantKind::Creation => TaskKind::Synthesis,
            WantKind::Repair => TaskKind::Evolution,
        }
    }
}

/// The subconscious selector's pick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSelection {
    pub task: TaskKind,
    /// The want that won the selection, absent on random fallback.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want_id: Option<Uuid>,
    /// Whether this pick came from the uniform fallback.
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_kind_maps_to_want_kind() {
        assert_eq!(GapKind::Coverage.want_kind(), WantKind::Curiosity);
        assert_eq!(GapKind::Quality.want_kind(), WantKind::Mastery);
        assert_eq!(GapKind::Connection.want_kind(), WantKind::Connection);
        assert_eq!(GapKind::Structural.want_kind(), WantKind::Repair);
    }

    #[test]
    fn test_task_mapping_covers_every_want_kind() {
        assert_eq!(TaskKind::for_want(WantKind::Curiosity), TaskKind::Autogen);
        assert_eq!(TaskKind::for_want(WantKind::Mastery), TaskKind::Evolution);
        assert_eq!(TaskKind::for_want(WantKind::Connection), TaskKind::Dream);
        assert_eq!(TaskKind::for_want(WantKind::Creation), TaskKind::Synthesis);
        assert_eq!(TaskKind::for_want(WantKind::Repair), TaskKind::Evolution);
    }

    #[test]
    fn test_dream_signal_joins_domains() {
        let signal = DreamSignal {
            domains: vec!["music".to_string(), "mathematics".to_string()],
            insight: "shared interval structure".to_string(),
        };
        assert_eq!(signal.joined_domain(), "music.mathematics");
    }
}
