//! Core data model for the motivation engine.

pub mod message;
pub mod personality;
pub mod signal;
pub mod want;

pub use message::{
    DeliveryBlock, EnqueueParams, MessageKind, MessageStatus, SpontaneousMessage, Urgency,
    UserSpontaneousPrefs,
};
pub use personality::{
    EvolutionOutcome, HumorStyle, InteractionSignals, PersonalityEvent, PersonalityHistoryEntry,
    PersonalityProfile, PersonalitySnapshot, PersonalityTrait, TraitShift,
};
pub use signal::{
    DreamSignal, ExternalGoal, GapKind, GapSignal, InteractionSignal, PainSignal, TaskKind,
    TaskSelection,
};
pub use want::{want_key, DeathReason, Want, WantKind, WantOrigin, WantPriority, WantStatus};
