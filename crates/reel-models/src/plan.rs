//! Editing plan emitted for the compilation stage.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::segment::Segment;

/// How segments are ordered in the final reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderingMode {
    /// By position in the source video
    #[default]
    Chronological,
    /// Best moments first
    Importance,
    /// Build up towards the best moment, ending last
    Dramatic,
}

impl OrderingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderingMode::Chronological => "chronological",
            OrderingMode::Importance => "importance",
            OrderingMode::Dramatic => "dramatic",
        }
    }
}

impl std::fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderingMode {
    type Err = OrderingParseError;

    /// Case-insensitive; unknown names are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chronological" => Ok(OrderingMode::Chronological),
            "importance" => Ok(OrderingMode::Importance),
            "dramatic" => Ok(OrderingMode::Dramatic),
            _ => Err(OrderingParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown ordering mode: {0} (expected chronological, importance or dramatic)")]
pub struct OrderingParseError(String);

/// Degraded candidate source used when scoring left nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTier {
    /// Raw point events at a flat score
    Events,
    ShotChanges,
    Plays,
    /// Evenly spaced timeline slices
    Timeline,
    /// Nothing at all; the single `[0,10)` placeholder
    DefaultSegment,
}

impl FallbackTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::ShotChanges => "shot_changes",
            Self::Plays => "plays",
            Self::Timeline => "timeline",
            Self::DefaultSegment => "default_segment",
        }
    }
}

impl std::fmt::Display for FallbackTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered segment list for one reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HighlightPlan {
    pub segments: Vec<Segment>,

    /// Sum of segment durations in seconds
    pub total_duration: f64,

    pub highlight_count: usize,

    pub ordering: OrderingMode,
}

impl HighlightPlan {
    /// Build a plan, deriving the totals from the segments.
    pub fn new(segments: Vec<Segment>, ordering: OrderingMode) -> Self {
        let total_duration = segments.iter().map(|s| s.duration).sum();
        let highlight_count = segments.len();
        Self {
            segments,
            total_duration,
            highlight_count,
            ordering,
        }
    }
}

/// Bookkeeping about how a plan was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlanSummary {
    /// Candidates collected before scoring
    pub total_moments_found: usize,

    /// Candidates that survived scoring
    pub moments_ranked: usize,

    pub highlights_selected: usize,

    /// Fallback tier used, if scoring produced nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackTier>,

    /// Whether a closing segment had to be appended
    pub ending_added: bool,

    /// Video duration used for ending checks (0 when unknown)
    pub video_duration: f64,

    pub generated_at: DateTime<Utc>,
}

impl PlanSummary {
    pub fn new(total_moments_found: usize, moments_ranked: usize, highlights_selected: usize) -> Self {
        Self {
            total_moments_found,
            moments_ranked,
            highlights_selected,
            fallback: None,
            ending_added: false,
            video_duration: 0.0,
            generated_at: Utc::now(),
        }
    }
}

/// Plan plus summary, the full result of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlannerOutput {
    pub plan: HighlightPlan,
    pub summary: PlanSummary,
}
