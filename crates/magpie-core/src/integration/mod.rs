//! Bridges between the want registry and its external collaborators.
//!
//! Three consumers sit on the other side of this layer: the outside
//! goal/scheduler system (priority amplification), the subconscious task
//! runner (which background job class runs next), and the spontaneous
//! trigger poller. Inbound, the four signal generators turn external
//! observations into safety-gated want creations.

use rand::Rng;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::IntegrationConfig;
use crate::error::MotivationResult;
use crate::types::signal::{
    DreamSignal, ExternalGoal, GapSignal, InteractionSignal, PainSignal, TaskKind, TaskSelection,
};
use crate::types::want::{Want, WantKind, WantOrigin};
use crate::wants::engine::{CreateWantOutcome, CreateWantParams, WantEngine};

/// Spontaneous-trigger poll result.
#[derive(Debug, Clone)]
pub struct TriggerCheck {
    pub should_trigger: bool,
    /// The single highest-intensity want, present only when triggering.
    pub want: Option<Want>,
}

impl TriggerCheck {
    fn quiet() -> Self {
        Self {
            should_trigger: false,
            want: None,
        }
    }
}

/// The integration layer. Stateless apart from its config; operates on a
/// caller-owned [`WantEngine`].
#[derive(Debug, Clone, Default)]
pub struct IntegrationLayer {
    config: IntegrationConfig,
}

impl IntegrationLayer {
    pub fn new(config: IntegrationConfig) -> Self {
        Self { config }
    }

    /// Amplify an external goal's priority by the pull of matching wants.
    ///
    /// Each of the two multipliers is `1 + sum(intensity * weight)` over
    /// active wants on the goal's exact domain, respectively on the
    /// wildcard domain; the larger wins and the product is capped. A goal
    /// no want matches comes back unmodified.
    pub fn amplify_goal_priority(&self, engine: &WantEngine, goal: &ExternalGoal) -> f32 {
        let mut domain_sum = 0.0f32;
        let mut wildcard_sum = 0.0f32;
        let mut matched = false;

        for want in engine.active_wants() {
            if want.domain == goal.domain {
                domain_sum += want.intensity * self.config.amplification_weight;
                matched = true;
            } else if want.domain == self.config.wildcard_domain {
                wildcard_sum += want.intensity * self.config.amplification_weight;
                matched = true;
            }
        }

        if !matched {
            return goal.priority;
        }

        let multiplier = (1.0 + domain_sum).max(1.0 + wildcard_sum);
        let amplified = (goal.priority * multiplier).min(self.config.amplified_priority_cap);
        debug!(
            domain = %goal.domain,
            priority = goal.priority,
            amplified,
            "goal priority amplified"
        );
        amplified
    }

    /// Turn a substrate gap into a want. Gap kind picks the want kind;
    /// intensity scales with severity up to a cap.
    pub fn generate_want_from_gap(
        &self,
        engine: &mut WantEngine,
        signal: &GapSignal,
    ) -> MotivationResult<CreateWantOutcome> {
        let intensity = (signal.severity * self.config.gap_intensity_factor)
            .min(self.config.gap_intensity_cap);
        let description = match &signal.detail {
            Some(detail) => detail.clone(),
            None => format!("Close the {} gap in {}", signal.kind, signal.domain),
        };
        engine.create_want(
            CreateWantParams::new(
                signal.kind.want_kind(),
                signal.domain.clone(),
                WantOrigin::SubstrateGap,
            )
            .with_intensity(intensity)
            .with_description(description),
        )
    }

    /// Turn repeated user engagement into a want. Engagement below the
    /// threshold generates nothing; repeated engagement reads as mastery,
    /// first contact as curiosity.
    pub fn generate_want_from_interaction(
        &self,
        engine: &mut WantEngine,
        signal: &InteractionSignal,
    ) -> MotivationResult<Option<CreateWantOutcome>> {
        if signal.engagement < self.config.interaction_min_engagement {
            trace!(
                domain = %signal.domain,
                engagement = signal.engagement,
                "interaction below engagement threshold"
            );
            return Ok(None);
        }
        let kind = if signal.repeated {
            WantKind::Mastery
        } else {
            WantKind::Curiosity
        };
        let intensity = (signal.engagement * self.config.interaction_intensity_factor)
            .min(self.config.interaction_intensity_cap);
        let description = if signal.repeated {
            format!("Deepen recurring user interest in {}", signal.domain)
        } else {
            format!("Explore user interest in {}", signal.domain)
        };
        engine
            .create_want(
                CreateWantParams::new(kind, signal.domain.clone(), WantOrigin::UserInteraction)
                    .with_intensity(intensity)
                    .with_description(description),
            )
            .map(Some)
    }

    /// Turn a cross-domain dream synthesis into a creation want filed
    /// under the joined domain path, at fixed intensity.
    pub fn generate_want_from_dream(
        &self,
        engine: &mut WantEngine,
        signal: &DreamSignal,
    ) -> MotivationResult<CreateWantOutcome> {
        engine.create_want(
            CreateWantParams::new(
                WantKind::Creation,
                signal.joined_domain(),
                WantOrigin::DreamSynthesis,
            )
            .with_intensity(self.config.dream_intensity)
            .with_description(signal.insight.clone()),
        )
    }

    /// Turn a recurring error into a repair want; intensity grows with
    /// recurrence up to a cap.
    pub fn generate_want_from_pain(
        &self,
        engine: &mut WantEngine,
        signal: &PainSignal,
    ) -> MotivationResult<CreateWantOutcome> {
        let intensity = (self.config.pain_intensity_base
            + signal.recurrence as f32 * self.config.pain_intensity_step)
            .min(self.config.pain_intensity_cap);
        engine.create_want(
            CreateWantParams::new(WantKind::Repair, signal.domain.clone(), WantOrigin::PainEvent)
                .with_intensity(intensity)
                .with_description(signal.description.clone()),
        )
    }

    /// Pick the next background task class.
    ///
    /// Scores each active want whose mapped task is available and which
    /// still has processing share; the strongest wins, first encountered
    /// in registry order on ties. With no wants or no scoring candidate,
    /// falls back to a uniformly random available task. Returns `None`
    /// only when no tasks are available at all.
    pub fn select_subconscious_task(
        &self,
        engine: &WantEngine,
        available: &[TaskKind],
        current_domain: Option<&str>,
    ) -> Option<TaskSelection> {
        if available.is_empty() {
            return None;
        }

        let mut best: Option<(&Want, TaskKind)> = None;
        for want in engine.active_wants() {
            let task = TaskKind::for_want(want.kind);
            if !available.contains(&task) {
                continue;
            }
            if !engine.can_consume_processing(want) {
                continue;
            }
            match best {
                Some((leader, _)) if want.intensity <= leader.intensity => {}
                _ => best = Some((want, task)),
            }
        }

        let selection = match best {
            Some((want, task)) => TaskSelection {
                task,
                want_id: Some(want.id),
                fallback: false,
            },
            None => {
                let pick = rand::thread_rng().gen_range(0..available.len());
                TaskSelection {
                    task: available[pick],
                    want_id: None,
                    fallback: true,
                }
            }
        };
        trace!(
            task = %selection.task,
            fallback = selection.fallback,
            current_domain = current_domain.unwrap_or("-"),
            "subconscious task selected"
        );
        Some(selection)
    }

    /// Poll for a spontaneous trigger: fires with the single strongest
    /// active want once one crosses the intensity threshold.
    pub fn check_spontaneous_trigger(&self, engine: &WantEngine) -> TriggerCheck {
        let mut strongest: Option<&Want> = None;
        for want in engine.active_wants() {
            match strongest {
                Some(leader) if want.intensity <= leader.intensity => {}
                _ => strongest = Some(want),
            }
        }
        match strongest {
            Some(want) if want.intensity >= self.config.trigger_threshold => {
                debug!(want = %want.id, domain = %want.domain, intensity = want.intensity, "spontaneous trigger");
                TriggerCheck {
                    should_trigger: true,
                    want: Some(want.clone()),
                }
            }
            _ => TriggerCheck::quiet(),
        }
    }

    /// Ripple a boost across the want's domain family: every other active
    /// want sharing the first dot-segment receives a fraction of the
    /// boost. The excluded root ("general") never ripples. Returns how
    /// many wants were boosted.
    pub fn apply_network_effect(
        &self,
        engine: &mut WantEngine,
        want_id: Uuid,
        boost_amount: f32,
    ) -> MotivationResult<usize> {
        let source = engine
            .get_want(want_id)
            .ok_or(crate::error::MotivationError::WantNotFound { id: want_id })?;
        let root = source.domain_root().to_string();
        if root == self.config.network_excluded_root {
            return Ok(0);
        }

        let neighbors: Vec<Uuid> = engine
            .active_wants()
            .iter()
            .filter(|w| w.id != want_id && w.domain_root() == root)
            .map(|w| w.id)
            .collect();

        let ripple = boost_amount * self.config.network_effect_factor;
        let count = neighbors.len();
        for id in neighbors {
            engine.boost_want(id, ripple, "network_effect")?;
        }
        if count > 0 {
            debug!(source = %want_id, root = %root, count, "network effect applied");
        }
        Ok(count)
    }
}
