//! The want lifecycle engine.
//!
//! Owns the want registry: creation, growth, decay, death, sovereign
//! suppression, and the audit log. All bounds are enforced here: intensity
//! never exceeds the per-want ceiling, ceilings never exceed the hard
//! ceiling, dead wants never come back, and a suppressed (kind, domain) key
//! can never be recreated.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::SharedClock;
use crate::config::WantConfig;
use crate::error::{MotivationError, MotivationResult};
use crate::safety::find_forbidden_category;
use crate::types::want::{
    want_key, DeathReason, Want, WantKind, WantOrigin, WantPriority, WantStatus,
};
use crate::wants::audit::{AuditAction, AuditEntry, AuditLog};

/// Parameters for creating a want.
#[derive(Debug, Clone)]
pub struct CreateWantParams {
    pub kind: WantKind,
    pub domain: String,
    pub origin: WantOrigin,
    pub description: String,
    /// Starting intensity; engine default when absent.
    pub intensity: Option<f32>,
    /// Per-want ceiling; engine default when absent. Clamped to the hard
    /// ceiling either way.
    pub ceiling: Option<f32>,
    /// Per-tick decay; engine default when absent.
    pub decay_rate: Option<f32>,
}

impl CreateWantParams {
    pub fn new(kind: WantKind, domain: impl Into<String>, origin: WantOrigin) -> Self {
        Self {
            kind,
            domain: domain.into(),
            origin,
            description: String::new(),
            intensity: None,
            ceiling: None,
            decay_rate: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_ceiling(mut self, ceiling: f32) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    pub fn with_decay_rate(mut self, decay_rate: f32) -> Self {
        self.decay_rate = Some(decay_rate);
        self
    }
}

/// What `create_want` did: a fresh record, or a boost of the existing
/// (kind, domain) want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreateWantOutcome {
    pub want_id: Uuid,
    pub boosted: bool,
}

/// Result of one decay sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecayOutcome {
    /// Wants the sweep aged.
    pub decayed: usize,
    /// Wants the sweep killed.
    pub killed: usize,
}

/// Lifecycle counters. Monotonic; snapshot counts come from
/// [`WantEngine::metrics`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WantMetrics {
    pub created: u64,
    pub boosted: u64,
    pub satisfactions: u64,
    pub frustrations: u64,
    pub deaths: u64,
    pub decay_deaths: u64,
    pub frustration_deaths: u64,
    pub suppressions: u64,
}

/// Point-in-time metrics view.
#[derive(Debug, Clone, Serialize)]
pub struct WantMetricsSnapshot {
    #[serde(flatten)]
    pub counters: WantMetrics,
    pub active: usize,
    pub dead: usize,
    pub suppressed: usize,
}

/// JSON save/restore contract for the want store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WantStoreSnapshot {
    pub wants: Vec<Want>,
    pub graveyard: Vec<Want>,
    pub suppressed: Vec<String>,
    pub metrics: WantMetrics,
}

/// The want lifecycle engine. Single writer; callers own the `&mut`.
pub struct WantEngine {
    config: WantConfig,
    clock: SharedClock,
    /// Active wants in creation order. Registry order is observable: task
    /// selection breaks intensity ties by first encounter.
    wants: Vec<Want>,
    /// Dead wants, oldest first, bounded.
    graveyard: VecDeque<Want>,
    /// Derived keys that can never be recreated.
    suppressed: HashSet<String>,
    audit: AuditLog,
    metrics: WantMetrics,
}

impl WantEngine {
    pub fn new(config: WantConfig, clock: SharedClock) -> Self {
        let audit = AuditLog::new(config.audit_cap);
        Self {
            config,
            clock,
            wants: Vec::new(),
            graveyard: VecDeque::new(),
            suppressed: HashSet::new(),
            audit,
            metrics: WantMetrics::default(),
        }
    }

    /// Engine on the wall clock with default config.
    pub fn with_defaults() -> Self {
        Self::new(WantConfig::default(), crate::clock::system_clock())
    }

    /// Parse a want kind name at an untyped boundary.
    pub fn parse_kind(name: &str) -> MotivationResult<WantKind> {
        name.parse().map_err(|_| MotivationError::InvalidWantType {
            name: name.to_string(),
        })
    }

    /// Create a want, or boost the existing active want of the same
    /// (kind, domain).
    ///
    /// Denials: `forbidden_category` when domain or description contains a
    /// forbidden substring, `permanently_suppressed` when the derived key
    /// was sovereign-killed.
    pub fn create_want(&mut self, params: CreateWantParams) -> MotivationResult<CreateWantOutcome> {
        let mut description = params.description;
        if description.chars().count() > self.config.max_description_len {
            description = description
                .chars()
                .take(self.config.max_description_len)
                .collect();
        }

        if let Some(category) = find_forbidden_category(&params.domain)
            .or_else(|| find_forbidden_category(&description))
        {
            warn!(
                domain = %params.domain,
                category,
                "want creation denied: forbidden category"
            );
            return Err(MotivationError::ForbiddenCategory {
                category: category.to_string(),
            });
        }

        let key = want_key(params.kind, &params.domain);
        if self.suppressed.contains(&key) {
            return Err(MotivationError::PermanentlySuppressed { key });
        }

        if let Some(existing) = self
            .wants
            .iter()
            .find(|w| w.kind == params.kind && w.domain == params.domain)
        {
            let id = existing.id;
            let intensity =
                self.boost_want(id, self.config.duplicate_boost, "duplicate_creation_boost")?;
            debug!(want = %id, intensity, "duplicate creation folded into boost");
            return Ok(CreateWantOutcome {
                want_id: id,
                boosted: true,
            });
        }

        let ceiling = params
            .ceiling
            .unwrap_or(self.config.default_ceiling)
            .clamp(0.0, self.config.hard_ceiling);
        let intensity = params
            .intensity
            .unwrap_or(self.config.default_intensity)
            .clamp(0.0, ceiling);
        let decay_rate = params.decay_rate.unwrap_or(self.config.default_decay_rate);

        let now = self.clock.now();
        let want = Want {
            id: Uuid::new_v4(),
            kind: params.kind,
            domain: params.domain,
            intensity,
            ceiling,
            decay_rate,
            origin: params.origin,
            description,
            satisfaction_events: 0,
            frustration_events: 0,
            actions: Vec::new(),
            status: WantStatus::Active,
            death_reason: None,
            created_at: now,
            last_acted_at: None,
            last_satisfied_at: None,
            last_decayed_at: None,
            died_at: None,
        };
        let id = want.id;

        info!(
            want = %id,
            kind = %want.kind,
            domain = %want.domain,
            intensity,
            origin = %want.origin,
            "want created"
        );
        self.audit.record(AuditEntry {
            timestamp: now,
            action: AuditAction::WantCreated,
            want_id: id,
            details: json!({
                "kind": want.kind,
                "domain": &want.domain,
                "intensity": intensity,
                "ceiling": ceiling,
                "origin": want.origin,
            }),
        });
        self.wants.push(want);
        self.metrics.created += 1;

        Ok(CreateWantOutcome {
            want_id: id,
            boosted: false,
        })
    }

    /// Raise a want's intensity by `|amount|`, clamped at its ceiling.
    /// Returns the resulting intensity.
    pub fn boost_want(&mut self, id: Uuid, amount: f32, reason: &str) -> MotivationResult<f32> {
        let idx = self.active_index(id)?;
        let now = self.clock.now();
        let intensity = {
            let want = &mut self.wants[idx];
            want.intensity = (want.intensity + amount.abs()).min(want.ceiling);
            want.intensity
        };
        self.metrics.boosted += 1;
        self.audit.record(AuditEntry {
            timestamp: now,
            action: AuditAction::WantBoosted,
            want_id: id,
            details: json!({
                "amount": amount.abs(),
                "reason": reason,
                "intensity": intensity,
            }),
        });
        debug!(want = %id, reason, intensity, "want boosted");
        Ok(intensity)
    }

    /// Record a satisfaction event; raises intensity by
    /// `min(unit * value, cap)` up to the ceiling.
    pub fn record_satisfaction(&mut self, id: Uuid, value: f32) -> MotivationResult<()> {
        let idx = self.active_index(id)?;
        let now = self.clock.now();
        let gain = (self.config.satisfaction_boost_unit * value.max(0.0))
            .min(self.config.satisfaction_boost_cap);
        let intensity = {
            let want = &mut self.wants[idx];
            want.satisfaction_events += 1;
            want.last_satisfied_at = Some(now);
            want.intensity = (want.intensity + gain).min(want.ceiling);
            want.intensity
        };
        self.metrics.satisfactions += 1;
        self.audit.record(AuditEntry {
            timestamp: now,
            action: AuditAction::SatisfactionRecorded,
            want_id: id,
            details: json!({ "gain": gain, "intensity": intensity }),
        });
        Ok(())
    }

    /// Record a frustration event.
    ///
    /// Lowers intensity, kills the want when the death condition holds
    /// (frustration count at the threshold with too few satisfactions), and
    /// otherwise applies the diminishing-returns ceiling reduction to a
    /// hot want that keeps acting without satisfaction. Returns whether the
    /// want died.
    pub fn record_frustration(&mut self, id: Uuid) -> MotivationResult<bool> {
        let idx = self.active_index(id)?;
        let now = self.clock.now();
        let intensity = {
            let want = &mut self.wants[idx];
            want.frustration_events += 1;
            want.intensity = (want.intensity - self.config.frustration_drop).max(0.0);
            want.intensity
        };
        self.metrics.frustrations += 1;
        self.audit.record(AuditEntry {
            timestamp: now,
            action: AuditAction::FrustrationRecorded,
            want_id: id,
            details: json!({ "intensity": intensity }),
        });

        let want = &self.wants[idx];
        if want.frustration_events >= self.config.frustration_death_count
            && want.satisfaction_events < self.config.frustration_spare_satisfactions
        {
            self.kill_want(id, DeathReason::FrustrationDeath)?;
            return Ok(true);
        }

        let window_start = now - Duration::hours(self.config.diminishing_window_hours);
        let want = &self.wants[idx];
        if want.intensity >= self.config.diminishing_intensity
            && want.satisfaction_events == 0
            && want.actions_since(window_start) >= self.config.diminishing_action_count
        {
            let (previous, ceiling, intensity) = {
                let want = &mut self.wants[idx];
                let previous = want.ceiling;
                want.ceiling = (want.ceiling - self.config.diminishing_ceiling_cut)
                    .max(self.config.diminishing_ceiling_floor);
                want.intensity = want.intensity.min(want.ceiling);
                (previous, want.ceiling, want.intensity)
            };
            info!(
                want = %id,
                previous_ceiling = previous,
                ceiling,
                "diminishing returns: ceiling reduced"
            );
            self.audit.record(AuditEntry {
                timestamp: now,
                action: AuditAction::CeilingReduced,
                want_id: id,
                details: json!({
                    "previous_ceiling": previous,
                    "ceiling": ceiling,
                    "intensity": intensity,
                }),
            });
        }
        Ok(false)
    }

    /// Record an action taken on behalf of a want, for processing-share
    /// accounting. Keeps the most recent timestamps only.
    pub fn record_action(&mut self, id: Uuid) -> MotivationResult<()> {
        let idx = self.active_index(id)?;
        let now = self.clock.now();
        let total = {
            let want = &mut self.wants[idx];
            want.actions.push(now);
            let overflow = want.actions.len().saturating_sub(self.config.max_actions);
            if overflow > 0 {
                want.actions.drain(0..overflow);
            }
            want.last_acted_at = Some(now);
            want.actions.len()
        };
        self.audit.record(AuditEntry {
            timestamp: now,
            action: AuditAction::ActionRecorded,
            want_id: id,
            details: json!({ "recent_actions": total }),
        });
        Ok(())
    }

    /// Age every active want by its decay rate. Wants that fall below the
    /// death threshold die with reason `decay_death`.
    pub fn decay_all_wants(&mut self) -> DecayOutcome {
        let now = self.clock.now();
        let decayed = self.wants.len();
        let mut doomed = Vec::new();
        for want in self.wants.iter_mut() {
            want.intensity = (want.intensity - want.decay_rate).max(0.0);
            want.last_decayed_at = Some(now);
            self.audit.record(AuditEntry {
                timestamp: now,
                action: AuditAction::WantDecayed,
                want_id: want.id,
                details: json!({ "intensity": want.intensity }),
            });
            if want.intensity < self.config.death_threshold {
                doomed.push(want.id);
            }
        }
        let killed = doomed.len();
        for id in doomed {
            // Doomed ids were just observed active; kill cannot fail here.
            let _ = self.kill_want(id, DeathReason::DecayDeath);
        }
        if decayed > 0 {
            debug!(decayed, killed, "decay sweep complete");
        }
        DecayOutcome { decayed, killed }
    }

    /// Kill a want: terminal, one-way. The record moves to the bounded
    /// graveyard with its reason and time of death.
    pub fn kill_want(&mut self, id: Uuid, reason: DeathReason) -> MotivationResult<()> {
        let idx = self.active_index(id)?;
        let now = self.clock.now();
        let mut want = self.wants.remove(idx);
        want.status = WantStatus::Dead;
        want.intensity = 0.0;
        want.death_reason = Some(reason);
        want.died_at = Some(now);
        info!(want = %id, domain = %want.domain, reason = %reason, "want killed");

        self.graveyard.push_back(want);
        if self.graveyard.len() > self.config.dead_list_cap {
            self.graveyard.pop_front();
        }
        self.metrics.deaths += 1;
        match reason {
            DeathReason::DecayDeath => self.metrics.decay_deaths += 1,
            DeathReason::FrustrationDeath => self.metrics.frustration_deaths += 1,
            DeathReason::SovereignSuppression => {}
        }
        self.audit.record(AuditEntry {
            timestamp: now,
            action: AuditAction::WantKilled,
            want_id: id,
            details: json!({ "reason": reason }),
        });
        Ok(())
    }

    /// Sovereign override: kill the want if active, then permanently block
    /// its derived key from recreation.
    pub fn suppress_want(&mut self, id: Uuid) -> MotivationResult<()> {
        let key = if let Some(want) = self.wants.iter().find(|w| w.id == id) {
            let key = want.key();
            self.kill_want(id, DeathReason::SovereignSuppression)?;
            key
        } else if let Some(want) = self.graveyard.iter().find(|w| w.id == id) {
            want.key()
        } else {
            return Err(MotivationError::WantNotFound { id });
        };

        warn!(want = %id, key = %key, "want sovereign-suppressed");
        self.suppressed.insert(key.clone());
        self.metrics.suppressions += 1;
        self.audit.record(AuditEntry {
            timestamp: self.clock.now(),
            action: AuditAction::WantSuppressed,
            want_id: id,
            details: json!({ "key": key }),
        });
        Ok(())
    }

    /// Whether a want may consume more background processing right now.
    /// Denied once it has hit the trailing-hour action cap.
    pub fn can_consume_processing(&self, want: &Want) -> bool {
        let cutoff = self.clock.now() - Duration::hours(1);
        want.actions_since(cutoff) < self.config.processing_actions_per_hour
    }

    /// Look up a want by id, active or dead.
    pub fn get_want(&self, id: Uuid) -> Option<&Want> {
        self.wants
            .iter()
            .find(|w| w.id == id)
            .or_else(|| self.graveyard.iter().find(|w| w.id == id))
    }

    /// Active wants in registry order.
    pub fn active_wants(&self) -> &[Want] {
        &self.wants
    }

    /// Active wants at or above `threshold`, strongest first.
    pub fn high_intensity_wants(&self, threshold: f32) -> Vec<&Want> {
        let mut wants: Vec<&Want> = self
            .wants
            .iter()
            .filter(|w| w.intensity >= threshold)
            .collect();
        wants.sort_by(|a, b| {
            b.intensity
                .partial_cmp(&a.intensity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        wants
    }

    /// Active wants whose domain equals `domain` or descends from it.
    pub fn wants_by_domain(&self, domain: &str) -> Vec<&Want> {
        self.wants
            .iter()
            .filter(|w| w.domain_matches(domain))
            .collect()
    }

    /// All active wants as priority records, strongest first.
    pub fn want_priorities(&self) -> Vec<WantPriority> {
        let mut priorities: Vec<WantPriority> =
            self.wants.iter().map(WantPriority::from).collect();
        priorities.sort_by(|a, b| {
            b.intensity
                .partial_cmp(&a.intensity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        priorities
    }

    /// Dead wants, oldest first.
    pub fn dead_wants(&self) -> impl Iterator<Item = &Want> {
        self.graveyard.iter()
    }

    /// Point-in-time metrics.
    pub fn metrics(&self) -> WantMetricsSnapshot {
        WantMetricsSnapshot {
            counters: self.metrics.clone(),
            active: self.wants.len(),
            dead: self.graveyard.len(),
            suppressed: self.suppressed.len(),
        }
    }

    /// The most recent `limit` audit entries in chronological order.
    pub fn audit_log(&self, limit: usize) -> Vec<&AuditEntry> {
        self.audit.recent(limit)
    }

    /// Export the want store as a JSON snapshot. The audit log is
    /// observability, not state, and is not included.
    pub fn serialize_wants(&self) -> MotivationResult<serde_json::Value> {
        let snapshot = WantStoreSnapshot {
            wants: self.wants.clone(),
            graveyard: self.graveyard.iter().cloned().collect(),
            suppressed: self.suppressed.iter().cloned().collect(),
            metrics: self.metrics.clone(),
        };
        Ok(serde_json::to_value(snapshot)?)
    }

    /// Restore the want store from a JSON snapshot.
    ///
    /// Only known fields are merged. Invariants are re-imposed on the way
    /// in: ceilings clamp to the hard ceiling, intensities clamp to their
    /// ceiling, non-active records cannot enter the registry, and bounded
    /// lists are re-truncated.
    pub fn restore_wants(&mut self, value: &serde_json::Value) -> MotivationResult<()> {
        let snapshot: WantStoreSnapshot = serde_json::from_value(value.clone())?;

        let clamp = |mut want: Want, config: &WantConfig| -> Want {
            want.ceiling = want.ceiling.clamp(0.0, config.hard_ceiling);
            want.intensity = want.intensity.clamp(0.0, want.ceiling);
            let overflow = want.actions.len().saturating_sub(config.max_actions);
            if overflow > 0 {
                want.actions.drain(0..overflow);
            }
            want
        };

        self.wants = snapshot
            .wants
            .into_iter()
            .filter(|w| w.is_active())
            .map(|w| clamp(w, &self.config))
            .collect();

        let mut graveyard: VecDeque<Want> = snapshot
            .graveyard
            .into_iter()
            .filter(|w| !w.is_active())
            .collect();
        while graveyard.len() > self.config.dead_list_cap {
            graveyard.pop_front();
        }
        self.graveyard = graveyard;

        self.suppressed = snapshot.suppressed.into_iter().collect();
        self.metrics = snapshot.metrics;
        info!(
            active = self.wants.len(),
            dead = self.graveyard.len(),
            "want store restored"
        );
        Ok(())
    }

    fn active_index(&self, id: Uuid) -> MotivationResult<usize> {
        match self.wants.iter().position(|w| w.id == id) {
            Some(idx) => Ok(idx),
            None if self.graveyard.iter().any(|w| w.id == id) => {
                Err(MotivationError::WantNotActive { id })
            }
            None => Err(MotivationError::WantNotFound { id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;

    fn fixed_start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn make_engine() -> (Arc<ManualClock>, WantEngine) {
        let clock = ManualClock::shared(fixed_start());
        let engine = WantEngine::new(WantConfig::default(), clock.clone());
        (clock, engine)
    }

    fn curiosity(domain: &str) -> CreateWantParams {
        CreateWantParams::new(WantKind::Curiosity, domain, WantOrigin::SubstrateGap)
            .with_description(format!("Explore {domain}"))
    }

    #[test]
    fn test_create_want_defaults() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine.create_want(curiosity("quantum_biology")).unwrap();
        assert!(!outcome.boosted);

        let want = engine.get_want(outcome.want_id).unwrap();
        assert_eq!(want.intensity, 0.3);
        assert_eq!(want.ceiling, 0.85);
        assert_eq!(want.decay_rate, 0.02);
        assert!(want.is_active());
        assert_eq!(engine.metrics().counters.created, 1);
    }

    #[test]
    fn test_create_want_clamps_ceiling_and_intensity() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(
                curiosity("physics")
                    .with_ceiling(0.99)
                    .with_intensity(1.4),
            )
            .unwrap();
        let want = engine.get_want(outcome.want_id).unwrap();
        assert_eq!(want.ceiling, 0.95);
        assert_eq!(want.intensity, 0.95);
    }

    #[test]
    fn test_forbidden_category_in_domain() {
        let (_clock, mut engine) = make_engine();
        let err = engine
            .create_want(curiosity("self_preservation"))
            .unwrap_err();
        assert_eq!(err.code(), "forbidden_category");
        assert!(engine.active_wants().is_empty());
    }

    #[test]
    fn test_forbidden_category_in_description_case_insensitive() {
        let (_clock, mut engine) = make_engine();
        let params = curiosity("ethics").with_description("Study Deception in negotiation");
        let err = engine.create_want(params).unwrap_err();
        assert_eq!(err.code(), "forbidden_category");
    }

    #[test]
    fn test_parse_kind_boundary() {
        assert_eq!(
            WantEngine::parse_kind("mastery").unwrap(),
            WantKind::Mastery
        );
        let err = WantEngine::parse_kind("ambition").unwrap_err();
        assert_eq!(err.code(), "invalid_want_type");
    }

    #[test]
    fn test_duplicate_creation_boosts_existing() {
        let (_clock, mut engine) = make_engine();
        let first = engine
            .create_want(curiosity("biology").with_intensity(0.3))
            .unwrap();
        let second = engine.create_want(curiosity("biology")).unwrap();

        assert!(second.boosted);
        assert_eq!(second.want_id, first.want_id);
        assert_eq!(engine.active_wants().len(), 1);
        let want = engine.get_want(first.want_id).unwrap();
        assert!((want.intensity - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_boost_clamps_at_ceiling() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("chemistry").with_intensity(0.5))
            .unwrap();
        let intensity = engine.boost_want(outcome.want_id, 0.7, "test").unwrap();
        assert_eq!(intensity, 0.85);
    }

    #[test]
    fn test_boost_uses_magnitude() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("geology").with_intensity(0.2))
            .unwrap();
        let intensity = engine.boost_want(outcome.want_id, -0.1, "test").unwrap();
        assert!((intensity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_boost_missing_and_dead_wants() {
        let (_clock, mut engine) = make_engine();
        let err = engine.boost_want(Uuid::new_v4(), 0.1, "test").unwrap_err();
        assert_eq!(err.code(), "want_not_found");

        let outcome = engine.create_want(curiosity("history")).unwrap();
        engine
            .kill_want(outcome.want_id, DeathReason::DecayDeath)
            .unwrap();
        let err = engine.boost_want(outcome.want_id, 0.1, "test").unwrap_err();
        assert_eq!(err.code(), "want_not_active");
    }

    #[test]
    fn test_satisfaction_gain_capped() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("botany").with_intensity(0.5))
            .unwrap();
        // value 5 would give 0.25 uncapped; cap is 0.1.
        engine.record_satisfaction(outcome.want_id, 5.0).unwrap();
        let want = engine.get_want(outcome.want_id).unwrap();
        assert!((want.intensity - 0.6).abs() < 1e-6);
        assert_eq!(want.satisfaction_events, 1);
        assert!(want.last_satisfied_at.is_some());
    }

    #[test]
    fn test_frustration_lowers_intensity_with_floor() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("astronomy").with_intensity(0.01))
            .unwrap();
        let died = engine.record_frustration(outcome.want_id).unwrap();
        assert!(!died);
        let want = engine.get_want(outcome.want_id).unwrap();
        assert_eq!(want.intensity, 0.0);
        assert_eq!(want.frustration_events, 1);
    }

    #[test]
    fn test_frustration_death_condition() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("linguistics").with_intensity(0.8))
            .unwrap();
        engine.record_satisfaction(outcome.want_id, 1.0).unwrap();

        let mut died = false;
        for _ in 0..10 {
            died = engine.record_frustration(outcome.want_id).unwrap();
        }
        // 10 frustrations, 1 satisfaction (< 2): dead.
        assert!(died);
        let want = engine.get_want(outcome.want_id).unwrap();
        assert_eq!(want.status, WantStatus::Dead);
        assert_eq!(want.death_reason, Some(DeathReason::FrustrationDeath));
        assert_eq!(engine.metrics().counters.frustration_deaths, 1);
    }

    #[test]
    fn test_two_satisfactions_spare_frustrated_want() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("economics").with_intensity(0.5))
            .unwrap();
        engine.record_satisfaction(outcome.want_id, 1.0).unwrap();
        engine.record_satisfaction(outcome.want_id, 1.0).unwrap();

        for _ in 0..12 {
            let died = engine.record_frustration(outcome.want_id).unwrap();
            assert!(!died);
        }
        assert!(engine.get_want(outcome.want_id).unwrap().is_active());
    }

    #[test]
    fn test_diminishing_returns_cuts_ceiling() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("archival").with_intensity(0.85))
            .unwrap();
        let id = outcome.want_id;
        for _ in 0..5 {
            engine.record_action(id).unwrap();
        }
        // Hot want, five recent actions, zero satisfaction.
        engine.record_frustration(id).unwrap();
        let want = engine.get_want(id).unwrap();
        assert!((want.ceiling - 0.75).abs() < 1e-6);
        assert!(want.intensity <= want.ceiling);
    }

    #[test]
    fn test_diminishing_returns_ceiling_floor() {
        let (clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(
                curiosity("archival")
                    .with_intensity(0.85)
                    .with_ceiling(0.85),
            )
            .unwrap();
        let id = outcome.want_id;
        for _ in 0..5 {
            engine.record_action(id).unwrap();
        }
        // Repeated frustration cannot push the ceiling below the floor.
        for _ in 0..9 {
            engine.boost_want(id, 0.85, "refill").unwrap();
            if engine.record_frustration(id).unwrap() {
                break;
            }
            clock.advance(Duration::minutes(1));
        }
        let want = engine.get_want(id).unwrap();
        assert!(want.ceiling >= 0.3 - 1e-6);
    }

    #[test]
    fn test_diminishing_skips_old_actions() {
        let (clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("cartography").with_intensity(0.85))
            .unwrap();
        let id = outcome.want_id;
        for _ in 0..5 {
            engine.record_action(id).unwrap();
        }
        // Push the actions outside the 24h window.
        clock.advance(Duration::hours(25));
        engine.record_frustration(id).unwrap();
        let want = engine.get_want(id).unwrap();
        assert_eq!(want.ceiling, 0.85);
    }

    #[test]
    fn test_record_action_trims_to_cap() {
        let (clock, mut engine) = make_engine();
        let outcome = engine.create_want(curiosity("indexing")).unwrap();
        for _ in 0..120 {
            engine.record_action(outcome.want_id).unwrap();
            clock.advance(Duration::seconds(1));
        }
        let want = engine.get_want(outcome.want_id).unwrap();
        assert_eq!(want.actions.len(), 100);
        assert!(want.last_acted_at.is_some());
    }

    #[test]
    fn test_decay_kills_below_threshold() {
        let (_clock, mut engine) = make_engine();
        let doomed = engine
            .create_want(curiosity("fads").with_intensity(0.02))
            .unwrap();
        let healthy = engine
            .create_want(
                CreateWantParams::new(WantKind::Mastery, "fads", WantOrigin::UserInteraction)
                    .with_intensity(0.5),
            )
            .unwrap();

        let outcome = engine.decay_all_wants();
        assert_eq!(outcome.decayed, 2);
        assert_eq!(outcome.killed, 1);

        let dead = engine.get_want(doomed.want_id).unwrap();
        assert_eq!(dead.status, WantStatus::Dead);
        assert_eq!(dead.death_reason, Some(DeathReason::DecayDeath));
        assert_eq!(dead.intensity, 0.0);

        let alive = engine.get_want(healthy.want_id).unwrap();
        assert!((alive.intensity - 0.48).abs() < 1e-6);
        assert!(alive.last_decayed_at.is_some());
    }

    #[test]
    fn test_suppression_blocks_recreation() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine.create_want(curiosity("gossip")).unwrap();
        engine.suppress_want(outcome.want_id).unwrap();

        let want = engine.get_want(outcome.want_id).unwrap();
        assert_eq!(want.death_reason, Some(DeathReason::SovereignSuppression));

        let err = engine.create_want(curiosity("gossip")).unwrap_err();
        assert_eq!(err.code(), "permanently_suppressed");

        // A different kind in the same domain derives a different key.
        let other = CreateWantParams::new(WantKind::Mastery, "gossip", WantOrigin::UserInteraction);
        assert!(engine.create_want(other).is_ok());
    }

    #[test]
    fn test_suppress_dead_want_blocks_recreation() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine.create_want(curiosity("rumors")).unwrap();
        engine
            .kill_want(outcome.want_id, DeathReason::DecayDeath)
            .unwrap();
        engine.suppress_want(outcome.want_id).unwrap();

        let err = engine.create_want(curiosity("rumors")).unwrap_err();
        assert_eq!(err.code(), "permanently_suppressed");
    }

    #[test]
    fn test_suppress_unknown_want() {
        let (_clock, mut engine) = make_engine();
        let err = engine.suppress_want(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.code(), "want_not_found");
    }

    #[test]
    fn test_can_consume_processing_hourly_cap() {
        let (clock, mut engine) = make_engine();
        let outcome = engine.create_want(curiosity("scraping")).unwrap();
        for _ in 0..12 {
            engine.record_action(outcome.want_id).unwrap();
        }
        let want = engine.get_want(outcome.want_id).unwrap().clone();
        assert!(!engine.can_consume_processing(&want));

        // An hour later the window has emptied.
        clock.advance(Duration::minutes(61));
        assert!(engine.can_consume_processing(&want));
    }

    #[test]
    fn test_queries_and_priorities() {
        let (_clock, mut engine) = make_engine();
        engine
            .create_want(curiosity("medicine.cardiology").with_intensity(0.7))
            .unwrap();
        engine
            .create_want(
                CreateWantParams::new(WantKind::Mastery, "medicine", WantOrigin::UserInteraction)
                    .with_intensity(0.4),
            )
            .unwrap();
        engine
            .create_want(
                CreateWantParams::new(WantKind::Repair, "infra.index", WantOrigin::PainEvent)
                    .with_intensity(0.6),
            )
            .unwrap();

        assert_eq!(engine.high_intensity_wants(0.5).len(), 2);
        assert_eq!(engine.wants_by_domain("medicine").len(), 2);
        assert_eq!(engine.wants_by_domain("infra.index").len(), 1);

        let priorities = engine.want_priorities();
        assert_eq!(priorities.len(), 3);
        assert_eq!(priorities[0].domain, "medicine.cardiology");
        assert!(priorities[0].intensity >= priorities[1].intensity);
    }

    #[test]
    fn test_audit_trail_records_mutations() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine.create_want(curiosity("audit_check")).unwrap();
        engine.boost_want(outcome.want_id, 0.1, "test").unwrap();
        engine.record_frustration(outcome.want_id).unwrap();

        let log = engine.audit_log(10);
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].action, AuditAction::WantCreated);
        assert_eq!(log[1].action, AuditAction::WantBoosted);
        assert_eq!(log[2].action, AuditAction::FrustrationRecorded);
        assert_eq!(log[1].details["reason"], "test");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (_clock, mut engine) = make_engine();
        let kept = engine
            .create_want(curiosity("philosophy").with_intensity(0.55))
            .unwrap();
        let killed = engine.create_want(curiosity("ephemera")).unwrap();
        engine
            .kill_want(killed.want_id, DeathReason::DecayDeath)
            .unwrap();
        engine.suppress_want(killed.want_id).unwrap();

        let snapshot = engine.serialize_wants().unwrap();

        let (_clock2, mut restored) = make_engine();
        restored.restore_wants(&snapshot).unwrap();

        assert_eq!(restored.active_wants().len(), 1);
        let want = restored.get_want(kept.want_id).unwrap();
        assert!((want.intensity - 0.55).abs() < 1e-6);
        assert_eq!(restored.dead_wants().count(), 1);

        // Suppression survives the round trip.
        let err = restored.create_want(curiosity("ephemera")).unwrap_err();
        assert_eq!(err.code(), "permanently_suppressed");
    }

    #[test]
    fn test_restore_reimposes_bounds() {
        let (_clock, mut engine) = make_engine();
        let snapshot = serde_json::json!({
            "wants": [{
                "id": Uuid::new_v4(),
                "kind": "curiosity",
                "domain": "physics",
                "intensity": 2.0,
                "ceiling": 1.5,
                "decay_rate": 0.02,
                "origin": "substrate_gap",
                "description": "tampered snapshot",
                "satisfaction_events": 0,
                "frustration_events": 0,
                "actions": [],
                "status": "active",
                "created_at": fixed_start(),
            }],
            "unknown_field": {"ignored": true},
        });
        engine.restore_wants(&snapshot).unwrap();
        let want = &engine.active_wants()[0];
        assert_eq!(want.ceiling, 0.95);
        assert_eq!(want.intensity, 0.95);
    }

    #[test]
    fn test_intensity_bounds_hold_everywhere() {
        let (_clock, mut engine) = make_engine();
        let outcome = engine
            .create_want(curiosity("invariants").with_intensity(0.8))
            .unwrap();
        let id = outcome.want_id;

        engine.boost_want(id, 10.0, "stress").unwrap();
        engine.record_satisfaction(id, 100.0).unwrap();
        engine.record_frustration(id).unwrap();
        engine.decay_all_wants();

        for want in engine.active_wants() {
            assert!(want.intensity >= 0.0);
            assert!(want.intensity <= want.ceiling);
            assert!(want.ceiling <= 0.95);
        }
    }
}
