//! magpie-core - Core library for magpie.
//!
//! This crate provides the bounded autonomous motivation engine: weighted,
//! decaying "want" records representing emergent interests, a slowly
//! evolving communication-style profile, and a rate-limited,
//! content-filtered spontaneous message queue drained on a schedule.
//!
//! # Example
//!
//! ```ignore
//! use magpie_core::{
//!     CreateWantParams, IntegrationLayer, WantEngine, WantKind, WantOrigin,
//! };
//!
//! let mut engine = WantEngine::with_defaults();
//! engine.create_want(
//!     CreateWantParams::new(WantKind::Curiosity, "quantum_biology", WantOrigin::SubstrateGap)
//!         .with_intensity(0.75),
//! )?;
//!
//! let layer = IntegrationLayer::default();
//! let check = layer.check_spontaneous_trigger(&engine);
//! assert!(check.should_trigger);
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod integration;
pub mod personality;
pub mod queue;
pub mod safety;
pub mod types;
pub mod wants;

// Re-export commonly used types
pub use clock::{system_clock, Clock, ManualClock, SharedClock, SystemClock};
pub use config::{
    IntegrationConfig, MotivationConfig, PersonalityConfig, QueueConfig, TickerConfig, WantConfig,
};
pub use error::{MotivationError, MotivationResult};
pub use integration::{IntegrationLayer, TriggerCheck};
pub use personality::PersonalityTracker;
pub use queue::{
    MessageDeliverer, MessageFormatter, ProcessParams, ProcessReport, QueueScheduler, QueueStatus,
    SessionProvider, SpontaneousQueue, TickerHooks, SKIP_SENTINEL,
};
pub use safety::{ContentSafetyFilter, ContentVerdict, RejectReason, FORBIDDEN_WANT_CATEGORIES};
pub use types::{
    DeathReason, DreamSignal, EnqueueParams, EvolutionOutcome, ExternalGoal, GapKind, GapSignal,
    HumorStyle, InteractionSignal, InteractionSignals, MessageKind, MessageStatus,
    PersonalityProfile, SpontaneousMessage, TaskKind, TaskSelection, Urgency,
    UserSpontaneousPrefs, Want, WantKind, WantOrigin, WantStatus,
};
pub use wants::{CreateWantOutcome, CreateWantParams, WantEngine, WantMetricsSnapshot};
