//! Want lifecycle: the registry engine and its audit trail.

pub mod audit;
pub mod engine;

pub use audit::{AuditAction, AuditEntry, AuditLog};
pub use engine::{
    CreateWantOutcome, CreateWantParams, DecayOutcome, WantEngine, WantMetrics,
    WantMetricsSnapshot, WantStoreSnapshot,
};
