//! Planner configuration.

use reel_models::OrderingMode;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Tunables for scoring, packing and the ending guarantee. All times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Shortest segment allowed (default: 3)
    pub min_duration: f64,
    /// Longest segment allowed (default: 30)
    pub max_duration: f64,
    /// Lead-in before ordinary moments (default: 2)
    pub pre_buffer: f64,
    /// Padding after every moment (default: 2)
    pub post_buffer: f64,
    /// Base lead-in for scoring plays; 2-3s are added on top (default: 6)
    pub scoring_pre_buffer: f64,
    /// Reel length budget, excluding the closing segment (default: 120)
    pub total_duration_cap: f64,
    /// Moments starting this close to the end are "ending" moments (default: 30)
    pub ending_window: f64,
    /// Length of the synthetic closing segment (default: 15)
    pub ending_segment_length: f64,
    /// A segment ending this close to the end already covers it (default: 20)
    pub ending_coverage_window: f64,
    /// The closing segment never gets shorter than this (default: 10)
    pub ending_min_length: f64,
    /// Slack when deciding two segments are the same moment (default: 3)
    pub overlap_tolerance: f64,
    /// Segment order in the emitted plan
    pub ordering: OrderingMode,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_duration: 3.0,
            max_duration: 30.0,
            pre_buffer: 2.0,
            post_buffer: 2.0,
            scoring_pre_buffer: 6.0,
            total_duration_cap: 120.0,
            ending_window: 30.0,
            ending_segment_length: 15.0,
            ending_coverage_window: 20.0,
            ending_min_length: 10.0,
            overlap_tolerance: 3.0,
            ordering: OrderingMode::Chronological,
        }
    }
}

impl PlannerConfig {
    /// Create config from environment variables.
    ///
    /// Absent or unparseable numbers keep their defaults; call
    /// [`PlannerConfig::validate`] (or build a planner) to reject bad values.
    /// An unknown `REEL_ORDERING` is an error.
    pub fn from_env() -> PlannerResult<Self> {
        let defaults = Self::default();
        let ordering = match std::env::var("REEL_ORDERING") {
            Ok(raw) => parse_ordering(&raw)?,
            Err(_) => defaults.ordering,
        };

        Ok(Self {
            min_duration: env_f64("REEL_MIN_DURATION").unwrap_or(defaults.min_duration),
            max_duration: env_f64("REEL_MAX_DURATION").unwrap_or(defaults.max_duration),
            pre_buffer: env_f64("REEL_PRE_BUFFER").unwrap_or(defaults.pre_buffer),
            post_buffer: env_f64("REEL_POST_BUFFER").unwrap_or(defaults.post_buffer),
            scoring_pre_buffer: env_f64("REEL_SCORING_PRE_BUFFER")
                .unwrap_or(defaults.scoring_pre_buffer),
            total_duration_cap: env_f64("REEL_TOTAL_DURATION_CAP")
                .unwrap_or(defaults.total_duration_cap),
            ending_window: env_f64("REEL_ENDING_WINDOW").unwrap_or(defaults.ending_window),
            ending_segment_length: env_f64("REEL_ENDING_SEGMENT_LENGTH")
                .unwrap_or(defaults.ending_segment_length),
            ending_coverage_window: env_f64("REEL_ENDING_COVERAGE_WINDOW")
                .unwrap_or(defaults.ending_coverage_window),
            ending_min_length: env_f64("REEL_ENDING_MIN_LENGTH")
                .unwrap_or(defaults.ending_min_length),
            overlap_tolerance: env_f64("REEL_OVERLAP_TOLERANCE")
                .unwrap_or(defaults.overlap_tolerance),
            ordering,
        })
    }

    /// Reject configurations that would produce nonsensical segments.
    pub fn validate(&self) -> PlannerResult<()> {
        let fields = [
            ("min_duration", self.min_duration),
            ("max_duration", self.max_duration),
            ("pre_buffer", self.pre_buffer),
            ("post_buffer", self.post_buffer),
            ("scoring_pre_buffer", self.scoring_pre_buffer),
            ("total_duration_cap", self.total_duration_cap),
            ("ending_window", self.ending_window),
            ("ending_segment_length", self.ending_segment_length),
            ("ending_coverage_window", self.ending_coverage_window),
            ("ending_min_length", self.ending_min_length),
            ("overlap_tolerance", self.overlap_tolerance),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(PlannerError::invalid_config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
            if value < 0.0 {
                return Err(PlannerError::invalid_config(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }

        if self.min_duration <= 0.0 {
            return Err(PlannerError::invalid_config("min_duration must be positive"));
        }

        if self.min_duration > self.max_duration {
            return Err(PlannerError::invalid_config(format!(
                "min_duration ({}) exceeds max_duration ({})",
                self.min_duration, self.max_duration
            )));
        }

        if self.total_duration_cap < self.min_duration {
            return Err(PlannerError::invalid_config(format!(
                "total_duration_cap ({}) is shorter than min_duration ({})",
                self.total_duration_cap, self.min_duration
            )));
        }

        if self.ending_min_length > self.ending_segment_length {
            return Err(PlannerError::invalid_config(format!(
                "ending_min_length ({}) exceeds ending_segment_length ({})",
                self.ending_min_length, self.ending_segment_length
            )));
        }

        Ok(())
    }

    /// Lead-in for a scoring play, longer when the shooter was seen.
    pub fn scoring_lead_in(&self, player_visible: bool) -> f64 {
        if player_visible {
            self.scoring_pre_buffer + 3.0
        } else {
            self.scoring_pre_buffer + 2.0
        }
    }

    /// Clamp a raw duration into `[min_duration, max_duration]`.
    pub fn clamp_duration(&self, duration: f64) -> f64 {
        duration.max(self.min_duration).min(self.max_duration)
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Parse an ordering name, rejecting unknown values.
pub fn parse_ordering(raw: &str) -> PlannerResult<OrderingMode> {
    raw.parse::<OrderingMode>()
        .map_err(|e| PlannerError::invalid_config(e.to_string()))
}
