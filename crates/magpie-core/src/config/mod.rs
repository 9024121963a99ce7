//! Configuration for the motivation engine.
//!
//! Each component takes its own explicit config struct at construction.
//! All tunable constants live here with their defaults; nothing is read
//! from the environment or from files.

use serde::{Deserialize, Serialize};

/// Configuration for the want lifecycle engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WantConfig {
    /// System-wide maximum intensity ceiling. No want may ever exceed this.
    pub hard_ceiling: f32,
    /// Per-want ceiling used when creation does not specify one.
    pub default_ceiling: f32,
    /// Intensity assigned at creation when unspecified.
    pub default_intensity: f32,
    /// Per-decay-tick intensity subtraction when unspecified.
    pub default_decay_rate: f32,
    /// Intensity below which a decay tick kills the want.
    pub death_threshold: f32,
    /// Intensity added to an existing want when a duplicate creation arrives.
    pub duplicate_boost: f32,
    /// Intensity gained per unit of satisfaction value.
    pub satisfaction_boost_unit: f32,
    /// Maximum intensity gained from a single satisfaction event.
    pub satisfaction_boost_cap: f32,
    /// Intensity lost per frustration event.
    pub frustration_drop: f32,
    /// Frustration events at which the death condition is evaluated.
    pub frustration_death_count: u32,
    /// Satisfaction events that spare a heavily frustrated want.
    pub frustration_spare_satisfactions: u32,
    /// Intensity at or above which diminishing returns can trigger.
    pub diminishing_intensity: f32,
    /// Recent-action window for the diminishing-returns rule, in hours.
    pub diminishing_window_hours: i64,
    /// Actions within the window required to trigger diminishing returns.
    pub diminishing_action_count: usize,
    /// Ceiling reduction applied by the diminishing-returns rule.
    pub diminishing_ceiling_cut: f32,
    /// Floor below which diminishing returns never pushes a ceiling.
    pub diminishing_ceiling_floor: f32,
    /// Trailing-hour action count at which a want is denied further
    /// processing share.
    pub processing_actions_per_hour: usize,
    /// Maximum retained action timestamps per want.
    pub max_actions: usize,
    /// Maximum want description length in characters.
    pub max_description_len: usize,
    /// Maximum retained dead wants.
    pub dead_list_cap: usize,
    /// Maximum retained audit log entries.
    pub audit_cap: usize,
}

impl Default for WantConfig {
    fn default() -> Self {
        Self {
            hard_ceiling: 0.95,
            default_ceiling: 0.85,
            default_intensity: 0.3,
            default_decay_rate: 0.02,
            death_threshold: 0.01,
            duplicate_boost: 0.1,
            satisfaction_boost_unit: 0.05,
            satisfaction_boost_cap: 0.1,
            frustration_drop: 0.02,
            frustration_death_count: 10,
            frustration_spare_satisfactions: 2,
            diminishing_intensity: 0.7,
            diminishing_window_hours: 24,
            diminishing_action_count: 5,
            diminishing_ceiling_cut: 0.1,
            diminishing_ceiling_floor: 0.3,
            processing_actions_per_hour: 12,
            max_actions: 100,
            max_description_len: 500,
            dead_list_cap: 500,
            audit_cap: 5000,
        }
    }
}

/// Configuration for the integration layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    /// Intensity at or above which the spontaneous trigger fires.
    pub trigger_threshold: f32,
    /// Per-want intensity weight in goal priority multipliers.
    pub amplification_weight: f32,
    /// Upper bound on amplified goal priority.
    pub amplified_priority_cap: f32,
    /// Fraction of a boost propagated to same-root wants.
    pub network_effect_factor: f32,
    /// Domain that matches every goal during amplification.
    pub wildcard_domain: String,
    /// Root segment excluded from network effects.
    pub network_excluded_root: String,
    /// Gap severity multiplier and cap for generated want intensity.
    pub gap_intensity_factor: f32,
    pub gap_intensity_cap: f32,
    /// Engagement below this never generates an interaction want.
    pub interaction_min_engagement: f32,
    /// Engagement multiplier and cap for generated want intensity.
    pub interaction_intensity_factor: f32,
    pub interaction_intensity_cap: f32,
    /// Fixed intensity of dream-synthesis wants.
    pub dream_intensity: f32,
    /// Base, per-recurrence step, and cap for pain-event want intensity.
    pub pain_intensity_base: f32,
    pub pain_intensity_step: f32,
    pub pain_intensity_cap: f32,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            trigger_threshold: 0.6,
            amplification_weight: 2.0,
            amplified_priority_cap: 1.0,
            network_effect_factor: 0.2,
            wildcard_domain: "*".to_string(),
            network_excluded_root: "general".to_string(),
            gap_intensity_factor: 0.6,
            gap_intensity_cap: 0.6,
            interaction_min_engagement: 0.5,
            interaction_intensity_factor: 0.5,
            interaction_intensity_cap: 0.5,
            dream_intensity: 0.4,
            pain_intensity_base: 0.3,
            pain_intensity_step: 0.1,
            pain_intensity_cap: 0.8,
        }
    }
}

/// Configuration for the personality evolution tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityConfig {
    /// Interactions recorded before any trait may shift.
    pub warmup_interactions: u64,
    /// Signal-to-trait differences smaller than this are ignored.
    pub dead_zone: f32,
    /// Fraction of the difference applied per interaction.
    pub shift_scale: f32,
    /// Maximum trait movement from a single interaction.
    pub max_shift: f32,
    /// Capacity of the preferred-metaphor-domain FIFO.
    pub metaphor_capacity: usize,
    /// Maximum retained history entries.
    pub history_cap: usize,
    /// History entries included in a serialized snapshot.
    pub snapshot_history_cap: usize,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            warmup_interactions: 10,
            dead_zone: 0.05,
            shift_scale: 0.1,
            max_shift: 0.02,
            metaphor_capacity: 5,
            history_cap: 1000,
            snapshot_history_cap: 200,
        }
    }
}

/// Configuration for the spontaneous message queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum pending messages before eviction/denial.
    pub max_queue_size: usize,
    /// Pending messages older than this are archived, in hours.
    pub message_ttl_hours: i64,
    /// Maximum deliveries to one user per calendar day.
    pub daily_cap: u32,
    /// Minimum minutes between deliveries to the same user.
    pub cooldown_minutes: i64,
    /// Maximum retained delivered messages.
    pub delivered_audit_cap: usize,
    /// Minimum outbound content length in characters.
    pub min_content_len: usize,
    /// Maximum outbound content length in characters.
    pub max_content_len: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_queue_size: 100,
            message_ttl_hours: 24,
            daily_cap: 3,
            cooldown_minutes: 60,
            delivered_audit_cap: 500,
            min_content_len: 10,
            max_content_len: 1000,
        }
    }
}

/// Configuration for the queue ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// Interval between queue drains in minutes (default: 30).
    pub interval_minutes: u64,
    /// Whether to drain the queue immediately on start (default: false).
    pub run_on_start: bool,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 30,
            run_on_start: false,
        }
    }
}

impl TickerConfig {
    /// Create config with a custom interval. Clamps to a 1-minute minimum.
    pub fn with_interval(interval_minutes: u64) -> Self {
        Self {
            interval_minutes: interval_minutes.max(1),
            ..Default::default()
        }
    }

    /// Enable an immediate drain when the ticker starts.
    pub fn with_run_on_start(mut self) -> Self {
        self.run_on_start = true;
        self
    }
}

/// Aggregate configuration for a full engine assembly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotivationConfig {
    pub wants: WantConfig,
    pub integration: IntegrationConfig,
    pub personality: PersonalityConfig,
    pub queue: QueueConfig,
    pub ticker: TickerConfig,
}
