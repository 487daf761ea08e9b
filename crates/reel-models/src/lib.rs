//! Shared data models for the highlight reel planner.
//!
//! This crate provides Serde-serializable types for:
//! - Upstream detection signals (point events, play intervals, shot changes)
//! - Candidate and scored moments
//! - Reel segments handed to the extraction stage
//! - The editing plan and its run summary

pub mod moment;
pub mod plan;
pub mod segment;
pub mod signals;
pub mod timestamp;

// Re-export common types
pub use moment::{CandidateMoment, MomentFlags, MomentKind, ScoredMoment};
pub use plan::{
    FallbackTier, HighlightPlan, OrderingMode, OrderingParseError, PlanSummary, PlannerOutput,
};
pub use segment::{Segment, SegmentType};
pub use signals::{DetectionReport, PlayInterval, PointEvent, ShotChange};
pub use timestamp::format_seconds;
