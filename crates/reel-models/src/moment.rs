//! Candidate and scored moments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which detector a moment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    /// Single time-stamped vision event
    PointEvent,
    /// Labeled play interval from object tracking
    PlayInterval,
    /// Shot-change boundary
    ShotChange,
    /// Evenly spaced slice of the timeline (last-resort fallback)
    TimelineSynthetic,
}

impl MomentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PointEvent => "point_event",
            Self::PlayInterval => "play_interval",
            Self::ShotChange => "shot_change",
            Self::TimelineSynthetic => "timeline_synthetic",
        }
    }
}

impl std::fmt::Display for MomentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Boolean signals attached to a moment. Missing signals are `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MomentFlags {
    pub is_successful: bool,
    pub is_highlight: bool,
    pub is_score_change: bool,
    pub is_close_game: bool,
    pub player_visible: bool,
    pub has_action: bool,
    /// Starts inside the closing window of the video
    pub is_ending: bool,
}

/// A normalized, time-stamped moment of possible interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CandidateMoment {
    pub kind: MomentKind,

    /// Start in seconds
    pub start_time: f64,

    /// End in seconds, never before `start_time`
    pub end_time: f64,

    /// Detector label (plays)
    #[serde(default)]
    pub label: String,

    /// Free-text description / analysis (events)
    #[serde(default)]
    pub description: String,

    pub confidence: f64,

    #[serde(default)]
    pub flags: MomentFlags,

    /// Crowd excitement, 0-10
    #[serde(default)]
    pub crowd_reaction: u8,
}

impl CandidateMoment {
    /// Create a moment; an inverted interval collapses to its start.
    pub fn new(kind: MomentKind, start_time: f64, end_time: f64, confidence: f64) -> Self {
        Self {
            kind,
            start_time,
            end_time: end_time.max(start_time),
            label: String::new(),
            description: String::new(),
            confidence,
            flags: MomentFlags::default(),
            crowd_reaction: 0,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_flags(mut self, flags: MomentFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_crowd_reaction(mut self, crowd_reaction: u8) -> Self {
        self.crowd_reaction = crowd_reaction.min(10);
        self
    }

    /// Span in seconds.
    pub fn span(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Score change or successful attempt.
    pub fn is_score_change(&self) -> bool {
        self.flags.is_score_change || self.flags.is_successful
    }

    /// Label if present, description otherwise.
    pub fn display_text(&self) -> &str {
        if self.label.is_empty() {
            &self.description
        } else {
            &self.label
        }
    }
}

/// A candidate annotated with its importance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoredMoment {
    #[serde(flatten)]
    pub moment: CandidateMoment,

    /// Derived importance, unbounded above
    pub importance_score: f64,
}

impl ScoredMoment {
    pub fn new(moment: CandidateMoment, importance_score: f64) -> Self {
        Self {
            moment,
            importance_score,
        }
    }
}
