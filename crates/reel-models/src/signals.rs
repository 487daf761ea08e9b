//! Upstream detection signals.
//!
//! These mirror what the vision/event-detection stage emits. Every field the
//! detectors may leave out is an `Option`; defaults are resolved when the
//! signals are normalized into candidate moments, never ad hoc at scoring time.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Top of the crowd reaction scale.
pub const MAX_CROWD_REACTION: u8 = 10;

/// A single time-stamped event reported by the vision model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PointEvent {
    /// Event time in seconds from the start of the video
    pub timestamp: f64,

    /// Free-text analysis of the frame
    #[serde(default)]
    pub analysis: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// The attempt succeeded (shot made, pass completed, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_successful: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_highlight: Option<bool>,

    /// The scoreboard changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_score_change: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_close_game: Option<bool>,

    /// Crowd excitement on a 0-10 scale
    #[serde(
        default,
        deserialize_with = "lenient_crowd_reaction",
        skip_serializing_if = "Option::is_none"
    )]
    pub crowd_reaction: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_action: Option<bool>,
}

impl PointEvent {
    /// Create an event with only a timestamp and analysis text.
    pub fn new(timestamp: f64, analysis: impl Into<String>) -> Self {
        Self {
            timestamp,
            analysis: analysis.into(),
            ..Default::default()
        }
    }
}

/// Accept any JSON number (or numeric string) for the crowd reaction.
///
/// Values are rounded and clamped to `0..=10`; anything else reads as absent.
fn lenient_crowd_reaction<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let value = match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(value
        .filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, f64::from(MAX_CROWD_REACTION)) as u8))
}

/// A labeled play interval from the object-tracking detector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayInterval {
    pub start_time: f64,
    pub end_time: f64,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl PlayInterval {
    pub fn new(start_time: f64, end_time: f64, label: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            label: label.into(),
            confidence: None,
        }
    }
}

/// A shot-change boundary interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotChange {
    pub start_time: f64,
    pub end_time: f64,
}

impl ShotChange {
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
        }
    }
}

/// Everything the detection stage produced for one video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionReport {
    /// Point events (vision model detections)
    #[serde(default, alias = "events")]
    pub point_events: Vec<PointEvent>,

    /// Labeled play intervals (object tracking)
    #[serde(default, alias = "plays")]
    pub play_intervals: Vec<PlayInterval>,

    /// Shot-change boundaries
    #[serde(default, alias = "key_frames")]
    pub shot_changes: Vec<ShotChange>,

    /// Source video path, used for duration probing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_path: Option<String>,

    /// Video duration in seconds, when the detection stage already knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl DetectionReport {
    pub fn new(
        point_events: Vec<PointEvent>,
        play_intervals: Vec<PlayInterval>,
        shot_changes: Vec<ShotChange>,
    ) -> Self {
        Self {
            point_events,
            play_intervals,
            shot_changes,
            video_path: None,
            duration: None,
        }
    }

    /// True when no detector produced anything.
    pub fn is_empty(&self) -> bool {
        self.point_events.is_empty() && self.play_intervals.is_empty() && self.shot_changes.is_empty()
    }

    /// Total number of raw signals across all detectors.
    pub fn signal_count(&self) -> usize {
        self.point_events.len() + self.play_intervals.len() + self.shot_changes.len()
    }
}
