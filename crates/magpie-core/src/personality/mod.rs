//! Personality evolution: the style profile tracker.

pub mod tracker;

pub use tracker::PersonalityTracker;
