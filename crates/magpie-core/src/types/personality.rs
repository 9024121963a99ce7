//! Personality types - the evolving communication-style profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Humor register of outbound communication.
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
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HumorStyle {
    #[default]
    Dry,
    Witty,
    Playful,
    Sardonic,
}

/// The numeric traits that evolve from interaction signals.
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
pub enum PersonalityTrait {
    VerbosityBaseline,
    ConfidenceInOpinions,
    CuriosityExpression,
    Formality,
}

/// One profile per runtime context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityProfile {
    /// Current humor register.
    pub humor_style: HumorStyle,
    /// FIFO of metaphor source domains, newest last.
    pub preferred_metaphor_domains: Vec<String>,
    /// How long-winded responses tend to be, in `[0, 1]`.
    pub verbosity_baseline: f32,
    /// Willingness to state opinions, in `[0, 1]`.
    pub confidence_in_opinions: f32,
    /// How openly curiosity is voiced, in `[0, 1]`.
    pub curiosity_expression: f32,
    /// Register formality, in `[0, 1]`.
    pub formality: f32,
    /// Total interactions ever recorded against this profile.
    pub interaction_count: u64,
}

impl Default for PersonalityProfile {
    fn default() -> Self {
        Self {
            humor_style: HumorStyle::Dry,
            preferred_metaphor_domains: Vec::new(),
            verbosity_baseline: 0.5,
            confidence_in_opinions: 0.5,
            curiosity_expression: 0.5,
            formality: 0.5,
            interaction_count: 0,
        }
    }
}

impl PersonalityProfile {
    /// Read a numeric trait by id.
    pub fn trait_value(&self, id: PersonalityTrait) -> f32 {
        match id {
            PersonalityTrait::VerbosityBaseline => self.verbosity_baseline,
            PersonalityTrait::ConfidenceInOpinions => self.confidence_in_opinions,
            PersonalityTrait::CuriosityExpression => self.curiosity_expression,
            PersonalityTrait::Formality => self.formality,
        }
    }

    /// Write a numeric trait by id, clamping into `[0, 1]`.
    pub fn set_trait_value(&mut self, id: PersonalityTrait, value: f32) {
        let value = value.clamp(0.0, 1.0);
        match id {
            PersonalityTrait::VerbosityBaseline => self.verbosity_baseline = value,
            PersonalityTrait::ConfidenceInOpinions => self.confidence_in_opinions = value,
            PersonalityTrait::CuriosityExpression => self.curiosity_expression = value,
            PersonalityTrait::Formality => self.formality = value,
        }
    }
}

/// One numeric trait movement inside a single interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitShift {
    pub field: PersonalityTrait,
    pub previous: f32,
    pub current: f32,
}

/// What happened to the profile at one history point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PersonalityEvent {
    /// Ordinary evolution from interaction signals.
    Evolved {
        shifts: Vec<TraitShift>,
        #[serde(skip_serializing_if = "Option::is_none")]
        metaphor_added: Option<String>,
    },
    /// Sovereign humor-style override.
    HumorOverride {
        previous: HumorStyle,
        current: HumorStyle,
    },
    /// Sovereign reset to the default profile.
    Reset,
}

/// Append-only history record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalityHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub interaction_count: u64,
    #[serde(flatten)]
    pub event: PersonalityEvent,
}

/// Observed signals from one interaction. All fields optional; absent
/// signals leave their trait untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSignals {
    /// Observed verbosity of the exchange, in `[0, 1]`.
    pub verbosity_used: Option<f32>,
    /// How question-dense the exchange was, in `[0, 1]`.
    pub questions_asked: Option<f32>,
    /// How much disagreement was voiced, in `[0, 1]`.
    pub disagreement_expressed: Option<f32>,
    /// Observed formality of the exchange, in `[0, 1]`.
    pub formality_level: Option<f32>,
    /// A metaphor source domain the exchange leaned on.
    pub metaphor_domain: Option<String>,
}

impl InteractionSignals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbosity(mut self, value: f32) -> Self {
        self.verbosity_used = Some(value);
        self
    }

    pub fn with_questions(mut self, value: f32) -> Self {
        self.questions_asked = Some(value);
        self
    }

    pub fn with_disagreement(mut self, value: f32) -> Self {
        self.disagreement_expressed = Some(value);
        self
    }

    pub fn with_formality(mut self, value: f32) -> Self {
        self.formality_level = Some(value);
        self
    }

    pub fn with_metaphor_domain(mut self, domain: impl Into<String>) -> Self {
        self.metaphor_domain = Some(domain.into());
        self
    }

    /// The (trait, signal value) pairs present in this interaction.
    pub fn numeric_signals(&self) -> Vec<(PersonalityTrait, f32)> {
        let mut signals = Vec::new();
        if let Some(v) = self.verbosity_used {
            signals.push((PersonalityTrait::VerbosityBaseline, v));
        }
        if let Some(v) = self.questions_asked {
            signals.push((PersonalityTrait::CuriosityExpression, v));
        }
        if let Some(v) = self.disagreement_expressed {
            signals.push((PersonalityTrait::ConfidenceInOpinions, v));
        }
        if let Some(v) = self.formality_level {
            signals.push((PersonalityTrait::Formality, v));
        }
        signals
    }
}

/// Outcome of recording one interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    /// Whether any part of the profile changed.
    pub evolved: bool,
    pub shifts: Vec<TraitShift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metaphor_added: Option<String>,
}

impl EvolutionOutcome {
    pub fn unchanged() -> Self {
        Self {
            evolved: false,
            shifts: Vec::new(),
            metaphor_added: None,
        }
    }
}

/// Flat snapshot of a profile plus bounded history, the save/restore
/// contract. Unknown fields in a restored payload are ignored; missing
/// fields fall back to profile defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalitySnapshot {
    pub humor_style: HumorStyle,
    pub preferred_metaphor_domains: Vec<String>,
    pub verbosity_baseline: f32,
    pub confidence_in_opinions: f32,
    pub curiosity_expression: f32,
    pub formality: f32,
    pub interaction_count: u64,
    pub history: Vec<PersonalityHistoryEntry>,
}

impl Default for PersonalitySnapshot {
    fn default() -> Self {
        let profile = PersonalityProfile::default();
        Self {
            humor_style: profile.humor_style,
            preferred_metaphor_domains: profile.preferred_metaphor_domains,
            verbosity_baseline: profile.verbosity_baseline,
            confidence_in_opinions: profile.confidence_in_opinions,
            curiosity_expression: profile.curiosity_expression,
            formality: profile.formality,
            interaction_count: profile.interaction_count,
            history: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humor_style_parses_snake_case() {
        assert_eq!("sardonic".parse::<HumorStyle>().unwrap(), HumorStyle::Sardonic);
        assert!("slapstick".parse::<HumorStyle>().is_err());
    }

    #[test]
    fn test_trait_access_clamps() {
        let mut profile = PersonalityProfile::default();
        profile.set_trait_value(PersonalityTrait::Formality, 1.7);
        assert_eq!(profile.trait_value(PersonalityTrait::Formality), 1.0);
        profile.set_trait_value(PersonalityTrait::Formality, -0.3);
        assert_eq!(profile.trait_value(PersonalityTrait::Formality), 0.0);
    }

    #[test]
    fn test_numeric_signals_only_present_fields() {
        let signals = InteractionSignals::new()
            .with_verbosity(0.8)
            .with_formality(0.2);
        let numeric = signals.numeric_signals();
        assert_eq!(numeric.len(), 2);
        assert!(numeric
            .iter()
            .any(|(t, _)| *t == PersonalityTrait::VerbosityBaseline));
        assert!(numeric.iter().any(|(t, _)| *t == PersonalityTrait::Formality));
    }

    #[test]
    fn test_snapshot_ignores_unknown_fields() {
        let payload = r#"{
            "verbosity_baseline": 0.7,
            "legacy_field_from_old_build": true
        }"#;
        let snapshot: PersonalitySnapshot = serde_json::from_str(payload).unwrap();
        assert_eq!(snapshot.verbosity_baseline, 0.7);
        assert_eq!(snapshot.formality, 0.5);
        assert_eq!(snapshot.humor_style, HumorStyle::Dry);
    }

    #[test]
    fn test_history_entry_serializes_event_tag() {
        let entry = PersonalityHistoryEntry {
            timestamp: Utc::now(),
            interaction_count: 12,
            event: PersonalityEvent::HumorOverride {
                previous: HumorStyle::Dry,
                current: HumorStyle::Witty,
            },
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"humor_override\""));
        assert!(json.contains("\"witty\""));
    }
}
