//! Reel segments handed to the extraction stage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::moment::MomentKind;
use crate::timestamp::format_seconds;

/// Where a segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    Event,
    Play,
    ShotChange,
    Timeline,
    /// Closing segment appended to cover the end of the video
    Ending,
    /// Placeholder emitted when no signal survived at all
    Default,
}

impl SegmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Play => "play",
            Self::ShotChange => "shot_change",
            Self::Timeline => "timeline",
            Self::Ending => "ending",
            Self::Default => "default",
        }
    }
}

impl From<MomentKind> for SegmentType {
    fn from(kind: MomentKind) -> Self {
        match kind {
            MomentKind::PointEvent => Self::Event,
            MomentKind::PlayInterval => Self::Play,
            MomentKind::ShotChange => Self::ShotChange,
            MomentKind::TimelineSynthetic => Self::Timeline,
        }
    }
}

impl std::fmt::Display for SegmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A buffered, duration-clamped time range selected for the reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Segment {
    /// Cut-in point in the source video (seconds)
    pub start_time: f64,

    /// Cut-out point in the source video (seconds)
    pub end_time: f64,

    /// `end_time - start_time`
    pub duration: f64,

    /// Original (pre-buffer) moment start
    pub event_start: f64,

    /// Original (pre-buffer) moment end
    pub event_end: f64,

    #[serde(rename = "type")]
    pub segment_type: SegmentType,

    #[serde(default)]
    pub description: String,

    pub importance: f64,
}

impl Segment {
    /// Create a segment; duration is derived from the cut points.
    pub fn new(
        start_time: f64,
        end_time: f64,
        segment_type: SegmentType,
        description: impl Into<String>,
        importance: f64,
    ) -> Self {
        Self {
            start_time,
            end_time,
            duration: end_time - start_time,
            event_start: start_time,
            event_end: end_time,
            segment_type,
            description: description.into(),
            importance,
        }
    }

    /// Record the original moment timing this segment was buffered around.
    pub fn with_event_range(mut self, event_start: f64, event_end: f64) -> Self {
        self.event_start = event_start;
        self.event_end = event_end;
        self
    }

    /// Human-readable `HH:MM:SS - HH:MM:SS` range.
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            format_seconds(self.start_time),
            format_seconds(self.end_time)
        )
    }

    /// True if `other` lies within `tolerance` seconds of this segment.
    pub fn is_near(&self, other: &Segment, tolerance: f64) -> bool {
        other.start_time <= self.end_time + tolerance && other.end_time >= self.start_time - tolerance
    }
}
