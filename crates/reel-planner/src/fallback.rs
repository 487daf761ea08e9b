//! Fallback chain for runs where scoring leaves nothing.
//!
//! Tiers are tried in order and the first non-empty one wins outright:
//! raw events, shot changes, plays, then synthetic timeline slices. Tiers are
//! never merged.

use reel_models::{
    CandidateMoment, DetectionReport, FallbackTier, MomentFlags, MomentKind, ScoredMoment,
};

use crate::collector::{DEFAULT_EVENT_CONFIDENCE, POINT_EVENT_SPAN};

pub const MAX_FALLBACK_EVENTS: usize = 15;
pub const MAX_FALLBACK_SHOT_CHANGES: usize = 10;
pub const MAX_FALLBACK_PLAYS: usize = 10;
pub const MAX_TIMELINE_SEGMENTS: usize = 5;

/// One timeline slice per this many seconds of video.
pub const TIMELINE_SPACING: f64 = 15.0;
pub const TIMELINE_SEGMENT_LENGTH: f64 = 10.0;

const EVENT_SCORE: f64 = 0.4;
const SHOT_CHANGE_SCORE: f64 = 0.5;
const PLAY_SCORE: f64 = 0.5;
const TIMELINE_SCORE: f64 = 0.3;

const SHOT_CHANGE_CONFIDENCE: f64 = 0.5;
const PLAY_CONFIDENCE: f64 = 0.5;
const TIMELINE_CONFIDENCE: f64 = 0.3;

const FALLBACK_CROWD_REACTION: u8 = 5;
const TIMELINE_CROWD_REACTION: u8 = 3;

/// Regenerates ranked moments from progressively weaker signals.
#[derive(Debug, Clone, Default)]
pub struct FallbackChain;

impl FallbackChain {
    pub fn new() -> Self {
        Self
    }

    /// Run the chain. Returns the tier used and its moments, or `None` when
    /// every tier came up empty.
    pub fn run(
        &self,
        report: &DetectionReport,
        video_duration: f64,
    ) -> Option<(FallbackTier, Vec<ScoredMoment>)> {
        let tiers = [
            FallbackTier::Events,
            FallbackTier::ShotChanges,
            FallbackTier::Plays,
            FallbackTier::Timeline,
        ];

        for tier in tiers {
            let moments = self.tier(tier, report, video_duration);
            if !moments.is_empty() {
                tracing::debug!(tier = %tier, moments = moments.len(), "Fallback tier produced moments");
                return Some((tier, moments));
            }
        }

        None
    }

    /// Moments produced by a single tier.
    pub fn tier(
        &self,
        tier: FallbackTier,
        report: &DetectionReport,
        video_duration: f64,
    ) -> Vec<ScoredMoment> {
        match tier {
            FallbackTier::Events => from_events(report),
            FallbackTier::ShotChanges => from_shot_changes(report),
            FallbackTier::Plays => from_plays(report),
            FallbackTier::Timeline => timeline(video_duration),
            FallbackTier::DefaultSegment => Vec::new(),
        }
    }
}

fn highlight_flags(is_successful: bool) -> MomentFlags {
    MomentFlags {
        is_successful,
        is_highlight: true,
        ..Default::default()
    }
}

fn from_events(report: &DetectionReport) -> Vec<ScoredMoment> {
    report
        .point_events
        .iter()
        .take(MAX_FALLBACK_EVENTS)
        .map(|event| {
            let description = if event.analysis.is_empty() {
                "Sports action".to_string()
            } else {
                event.analysis.clone()
            };
            let moment = CandidateMoment::new(
                MomentKind::PointEvent,
                event.timestamp,
                event.timestamp + POINT_EVENT_SPAN,
                event.confidence.unwrap_or(DEFAULT_EVENT_CONFIDENCE),
            )
            .with_description(description)
            .with_flags(highlight_flags(event.is_successful.unwrap_or(false)))
            .with_crowd_reaction(event.crowd_reaction.unwrap_or(FALLBACK_CROWD_REACTION));
            ScoredMoment::new(moment, EVENT_SCORE)
        })
        .collect()
}

fn from_shot_changes(report: &DetectionReport) -> Vec<ScoredMoment> {
    report
        .shot_changes
        .iter()
        .take(MAX_FALLBACK_SHOT_CHANGES)
        .enumerate()
        .map(|(i, shot)| {
            let moment = CandidateMoment::new(
                MomentKind::ShotChange,
                shot.start_time,
                shot.end_time,
                SHOT_CHANGE_CONFIDENCE,
            )
            .with_description(format!("Action moment {}", i + 1))
            .with_flags(highlight_flags(false))
            .with_crowd_reaction(FALLBACK_CROWD_REACTION);
            ScoredMoment::new(moment, SHOT_CHANGE_SCORE)
        })
        .collect()
}

fn from_plays(report: &DetectionReport) -> Vec<ScoredMoment> {
    report
        .play_intervals
        .iter()
        .take(MAX_FALLBACK_PLAYS)
        .map(|play| {
            let description = if play.label.is_empty() {
                "Sports play".to_string()
            } else {
                play.label.clone()
            };
            let moment = CandidateMoment::new(
                MomentKind::PlayInterval,
                play.start_time,
                play.end_time,
                play.confidence.unwrap_or(PLAY_CONFIDENCE),
            )
            .with_description(description)
            .with_flags(highlight_flags(false))
            .with_crowd_reaction(FALLBACK_CROWD_REACTION);
            // A rated play keeps its own confidence as the score
            let score = play.confidence.unwrap_or(PLAY_SCORE);
            ScoredMoment::new(moment, score)
        })
        .collect()
}

fn timeline(video_duration: f64) -> Vec<ScoredMoment> {
    if video_duration <= 0.0 {
        return Vec::new();
    }

    let count = ((video_duration / TIMELINE_SPACING).floor() as usize).min(MAX_TIMELINE_SEGMENTS);
    if count == 0 {
        return Vec::new();
    }

    let spacing = video_duration / count as f64;
    (0..count)
        .map(|i| {
            let start = i as f64 * spacing;
            let moment = CandidateMoment::new(
                MomentKind::TimelineSynthetic,
                start,
                start + TIMELINE_SEGMENT_LENGTH,
                TIMELINE_CONFIDENCE,
            )
            .with_description(format!("Video segment {}", i + 1))
            .with_flags(highlight_flags(false))
            .with_crowd_reaction(TIMELINE_CROWD_REACTION);
            ScoredMoment::new(moment, TIMELINE_SCORE)
        })
        .collect()
}
