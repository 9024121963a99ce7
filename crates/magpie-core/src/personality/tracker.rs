//! The personality evolution tracker.
//!
//! One slowly drifting communication-style profile per runtime context.
//! Drift is heavily damped: nothing moves during the warmup window, trait
//! differences inside the dead zone are noise, and a single interaction
//! can never move a trait more than the per-step cap.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::clock::SharedClock;
use crate::config::PersonalityConfig;
use crate::error::{MotivationError, MotivationResult};
use crate::types::personality::{
    EvolutionOutcome, HumorStyle, InteractionSignals, PersonalityEvent, PersonalityHistoryEntry,
    PersonalityProfile, PersonalitySnapshot, TraitShift,
};

/// Owns the profile and its bounded, append-only history.
pub struct PersonalityTracker {
    config: PersonalityConfig,
    clock: SharedClock,
    profile: PersonalityProfile,
    history: VecDeque<PersonalityHistoryEntry>,
}

impl PersonalityTracker {
    pub fn new(config: PersonalityConfig, clock: SharedClock) -> Self {
        Self {
            config,
            clock,
            profile: PersonalityProfile::default(),
            history: VecDeque::new(),
        }
    }

    /// Tracker on the wall clock with default config.
    pub fn with_defaults() -> Self {
        Self::new(PersonalityConfig::default(), crate::clock::system_clock())
    }

    /// Parse a humor style name at an untyped boundary.
    pub fn parse_style(name: &str) -> MotivationResult<HumorStyle> {
        name.parse().map_err(|_| MotivationError::InvalidStyle {
            name: name.to_string(),
        })
    }

    /// The current profile.
    pub fn profile(&self) -> &PersonalityProfile {
        &self.profile
    }

    /// The most recent `limit` history entries in chronological order.
    pub fn history(&self, limit: usize) -> Vec<&PersonalityHistoryEntry> {
        let skip = self.history.len().saturating_sub(limit);
        self.history.iter().skip(skip).collect()
    }

    /// Record one interaction's signals against the profile.
    ///
    /// The interaction counter always advances; evolution only begins once
    /// the warmup window has passed. Each present numeric signal nudges its
    /// trait toward the observed value: differences inside the dead zone
    /// are ignored, larger ones move the trait by
    /// `sign(diff) * min(|diff| * scale, cap)`, clamped to `[0, 1]`.
    pub fn record_interaction(&mut self, signals: &InteractionSignals) -> EvolutionOutcome {
        self.profile.interaction_count += 1;
        if self.profile.interaction_count < self.config.warmup_interactions {
            return EvolutionOutcome::unchanged();
        }

        let mut shifts = Vec::new();
        for (trait_id, observed) in signals.numeric_signals() {
            let current = self.profile.trait_value(trait_id);
            let diff = observed - current;
            if diff.abs() < self.config.dead_zone {
                continue;
            }
            let step = (diff.abs() * self.config.shift_scale).min(self.config.max_shift);
            let next = current + step.copysign(diff);
            self.profile.set_trait_value(trait_id, next);
            shifts.push(TraitShift {
                field: trait_id,
                previous: current,
                current: self.profile.trait_value(trait_id),
            });
        }

        let mut metaphor_added = None;
        if let Some(domain) = &signals.metaphor_domain {
            if !self.profile.preferred_metaphor_domains.contains(domain) {
                self.profile
                    .preferred_metaphor_domains
                    .push(domain.clone());
                if self.profile.preferred_metaphor_domains.len() > self.config.metaphor_capacity {
                    self.profile.preferred_metaphor_domains.remove(0);
                }
                metaphor_added = Some(domain.clone());
            }
        }

        if shifts.is_empty() && metaphor_added.is_none() {
            return EvolutionOutcome::unchanged();
        }

        debug!(
            shifts = shifts.len(),
            metaphor = metaphor_added.as_deref().unwrap_or("-"),
            "personality evolved"
        );
        self.push_history(PersonalityEvent::Evolved {
            shifts: shifts.clone(),
            metaphor_added: metaphor_added.clone(),
        });
        EvolutionOutcome {
            evolved: true,
            shifts,
            metaphor_added,
        }
    }

    /// Sovereign override: set the humor style immediately.
    pub fn set_humor_style(&mut self, style: HumorStyle) {
        let previous = self.profile.humor_style;
        if previous == style {
            return;
        }
        self.profile.humor_style = style;
        info!(%previous, current = %style, "humor style overridden");
        self.push_history(PersonalityEvent::HumorOverride {
            previous,
            current: style,
        });
    }

    /// Sovereign override from an untyped boundary; denies `invalid_style`.
    pub fn set_humor_style_by_name(&mut self, name: &str) -> MotivationResult<()> {
        let style = Self::parse_style(name)?;
        self.set_humor_style(style);
        Ok(())
    }

    /// Sovereign override: reset the profile to defaults. History is kept
    /// and records the reset.
    pub fn reset_personality(&mut self) {
        self.profile = PersonalityProfile::default();
        info!("personality reset to defaults");
        self.push_history(PersonalityEvent::Reset);
    }

    /// Export the profile plus a bounded history tail as a flat JSON
    /// snapshot.
    pub fn serialize_personality(&self) -> MotivationResult<serde_json::Value> {
        let skip = self
            .history
            .len()
            .saturating_sub(self.config.snapshot_history_cap);
        let snapshot = PersonalitySnapshot {
            humor_style: self.profile.humor_style,
            preferred_metaphor_domains: self.profile.preferred_metaphor_domains.clone(),
            verbosity_baseline: self.profile.verbosity_baseline,
            confidence_in_opinions: self.profile.confidence_in_opinions,
            curiosity_expression: self.profile.curiosity_expression,
            formality: self.profile.formality,
            interaction_count: self.profile.interaction_count,
            history: self.history.iter().skip(skip).cloned().collect(),
        };
        Ok(serde_json::to_value(snapshot)?)
    }

    /// Restore from a snapshot produced by [`serialize_personality`].
    ///
    /// Only fields of the known profile shape are merged; anything else in
    /// the payload is ignored, and missing fields keep their defaults.
    /// Trait values clamp into `[0, 1]` and bounded lists re-truncate on
    /// the way in.
    ///
    /// [`serialize_personality`]: PersonalityTracker::serialize_personality
    pub fn restore_personality(&mut self, value: &serde_json::Value) -> MotivationResult<()> {
        let snapshot: PersonalitySnapshot = serde_json::from_value(value.clone())?;

        let mut metaphors = snapshot.preferred_metaphor_domains;
        let overflow = metaphors.len().saturating_sub(self.config.metaphor_capacity);
        if overflow > 0 {
            metaphors.drain(0..overflow);
        }

        self.profile = PersonalityProfile {
            humor_style: snapshot.humor_style,
            preferred_metaphor_domains: metaphors,
            verbosity_baseline: snapshot.verbosity_baseline.clamp(0.0, 1.0),
            confidence_in_opinions: snapshot.confidence_in_opinions.clamp(0.0, 1.0),
            curiosity_expression: snapshot.curiosity_expression.clamp(0.0, 1.0),
            formality: snapshot.formality.clamp(0.0, 1.0),
            interaction_count: snapshot.interaction_count,
        };

        let mut history: VecDeque<PersonalityHistoryEntry> = snapshot.history.into();
        while history.len() > self.config.history_cap {
            history.pop_front();
        }
        self.history = history;

        info!(
            interaction_count = self.profile.interaction_count,
            "personality restored from snapshot"
        );
        Ok(())
    }

    fn push_history(&mut self, event: PersonalityEvent) {
        if self.history.len() >= self.config.history_cap {
            self.history.pop_front();
        }
        self.history.push_back(PersonalityHistoryEntry {
            timestamp: self.clock.now(),
            interaction_count: self.profile.interaction_count,
            event,
        });
    }
}
