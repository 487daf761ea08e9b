//! Moment collection.
//!
//! Normalizes the three detector outputs into [`CandidateMoment`]s. No
//! deduplication happens here; overlapping moments are resolved by the packer.

use reel_models::{CandidateMoment, MomentFlags, MomentKind, PlayInterval, PointEvent, ShotChange};

use crate::config::PlannerConfig;

/// Span given to a point event, which only has a timestamp.
pub const POINT_EVENT_SPAN: f64 = 5.0;

/// Confidence for events the vision model did not rate.
pub const DEFAULT_EVENT_CONFIDENCE: f64 = 0.4;

/// Confidence for plays the tracker did not rate.
pub const DEFAULT_PLAY_CONFIDENCE: f64 = 0.7;

pub const SHOT_CHANGE_CONFIDENCE: f64 = 0.6;

/// Crowd reaction assumed for events that did not report one.
pub const DEFAULT_EVENT_CROWD_REACTION: u8 = 3;

/// Confidence added to events inside the ending window.
pub const ENDING_CONFIDENCE_BOOST: f64 = 0.3;

/// Normalizes upstream signals into candidate moments.
#[derive(Debug, Clone)]
pub struct MomentCollector {
    ending_window: f64,
}

impl MomentCollector {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            ending_window: config.ending_window,
        }
    }

    /// Collect all candidates in detector order: events, then plays, then shot changes.
    ///
    /// `video_duration` of 0 disables ending detection.
    pub fn collect(
        &self,
        point_events: &[PointEvent],
        play_intervals: &[PlayInterval],
        shot_changes: &[ShotChange],
        video_duration: f64,
    ) -> Vec<CandidateMoment> {
        let mut moments =
            Vec::with_capacity(point_events.len() + play_intervals.len() + shot_changes.len());

        moments.extend(point_events.iter().map(|e| self.normalize_event(e, video_duration)));
        moments.extend(play_intervals.iter().map(from_play_interval));
        moments.extend(shot_changes.iter().map(from_shot_change));

        tracing::debug!(
            events = point_events.len(),
            plays = play_intervals.len(),
            shot_changes = shot_changes.len(),
            video_duration,
            "Collected candidate moments"
        );

        moments
    }

    /// True if a moment starting at `timestamp` falls in the closing window.
    pub fn is_ending(&self, timestamp: f64, video_duration: f64) -> bool {
        video_duration > 0.0 && timestamp >= video_duration - self.ending_window
    }

    fn normalize_event(&self, event: &PointEvent, video_duration: f64) -> CandidateMoment {
        let mut confidence = event.confidence.unwrap_or(DEFAULT_EVENT_CONFIDENCE);
        let mut flags = MomentFlags {
            is_successful: event.is_successful.unwrap_or(false),
            is_highlight: event.is_highlight.unwrap_or(false),
            is_score_change: event.is_score_change.unwrap_or(false),
            is_close_game: event.is_close_game.unwrap_or(false),
            player_visible: event.player_visible.unwrap_or(false),
            // A reported event implies action unless the detector says otherwise
            has_action: event.has_action.unwrap_or(true),
            is_ending: false,
        };

        if self.is_ending(event.timestamp, video_duration) {
            flags.is_ending = true;
            flags.is_highlight = true;
            confidence += ENDING_CONFIDENCE_BOOST;
        }

        CandidateMoment::new(
            MomentKind::PointEvent,
            event.timestamp,
            event.timestamp + POINT_EVENT_SPAN,
            confidence,
        )
        .with_description(event.analysis.clone())
        .with_flags(flags)
        .with_crowd_reaction(event.crowd_reaction.unwrap_or(DEFAULT_EVENT_CROWD_REACTION))
    }
}

fn from_play_interval(play: &PlayInterval) -> CandidateMoment {
    CandidateMoment::new(
        MomentKind::PlayInterval,
        play.start_time,
        play.end_time,
        play.confidence.unwrap_or(DEFAULT_PLAY_CONFIDENCE),
    )
    .with_label(play.label.clone())
}

fn from_shot_change(shot: &ShotChange) -> CandidateMoment {
    CandidateMoment::new(
        MomentKind::ShotChange,
        shot.start_time,
        shot.end_time,
        SHOT_CHANGE_CONFIDENCE,
    )
}
