//! Segment packing.
//!
//! Walks ranked moments best-first and turns each into a buffered segment.
//! Scoring plays get a long lead-in: the detected timestamp is usually the
//! ball going in, and the reel needs the attempt before it.
//!
//! A candidate is rejected when its range comes within `overlap_tolerance`
//! of any accepted segment, so near-adjacent duplicates are dropped along
//! with true overlaps. Packing stops once the duration budget is spent.

use reel_models::{ScoredMoment, Segment, SegmentType};

use crate::config::PlannerConfig;

/// Words that mark a moment as a scoring play.
const SCORING_PLAY_WORDS: [&str; 7] = [
    "basket",
    "goal",
    "score",
    "scored",
    "point",
    "touchdown",
    "made",
];

/// Scoring-play segments always reach this far past the event start.
pub const SCORING_PLAY_MIN_SPAN: f64 = 8.0;

pub const DEFAULT_SEGMENT_LENGTH: f64 = 10.0;
pub const DEFAULT_SEGMENT_IMPORTANCE: f64 = 0.3;

/// Converts ranked moments into non-overlapping, budgeted segments.
#[derive(Debug, Clone)]
pub struct SegmentPacker {
    config: PlannerConfig,
}

impl SegmentPacker {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Pack ranked moments. An empty ranking yields the single default segment.
    pub fn pack(&self, ranked: &[ScoredMoment]) -> Vec<Segment> {
        if ranked.is_empty() {
            tracing::warn!("No ranked moments, emitting default segment from video start");
            return vec![default_segment()];
        }

        let cap = self.config.total_duration_cap;
        let mut segments: Vec<Segment> = Vec::new();
        let mut total_duration = 0.0;

        for scored in ranked {
            if total_duration >= cap {
                break;
            }

            let Some((raw_end, mut segment)) = self.build_segment(scored) else {
                continue;
            };

            // Clamping up to min_duration can reach past the buffered end
            let reach = Segment {
                end_time: raw_end.max(segment.end_time),
                ..segment.clone()
            };
            if let Some(used) = segments
                .iter()
                .find(|used| used.is_near(&reach, self.config.overlap_tolerance))
            {
                tracing::trace!(
                    candidate = %reach.time_range(),
                    accepted = %used.time_range(),
                    "Skipping duplicate segment"
                );
                continue;
            }

            let remaining = cap - total_duration;
            if segment.duration > remaining {
                if remaining < self.config.min_duration {
                    break;
                }
                segment.end_time = segment.start_time + remaining;
                segment.duration = remaining;
            }

            total_duration += segment.duration;
            segments.push(segment);
        }

        tracing::debug!(
            ranked = ranked.len(),
            accepted = segments.len(),
            total_duration,
            "Packed segments"
        );

        segments
    }

    /// True if the moment should be treated as a scoring play.
    pub fn is_scoring_play(scored: &ScoredMoment) -> bool {
        let moment = &scored.moment;
        if moment.flags.is_successful {
            return true;
        }
        let description = moment.description.to_lowercase();
        SCORING_PLAY_WORDS.iter().any(|w| description.contains(w))
    }

    /// Buffered, clamped segment for a moment plus its unclamped end.
    fn build_segment(&self, scored: &ScoredMoment) -> Option<(f64, Segment)> {
        let moment = &scored.moment;
        let event_start = moment.start_time;
        let event_end = moment.end_time;
        if !event_start.is_finite() || !event_end.is_finite() {
            tracing::debug!(kind = %moment.kind, "Skipping moment with non-finite timing");
            return None;
        }

        let scoring = Self::is_scoring_play(scored);
        let lead_in = if scoring {
            self.config.scoring_lead_in(moment.flags.player_visible)
        } else {
            self.config.pre_buffer
        };

        let start = (event_start - lead_in).max(0.0);
        let raw_end = if scoring {
            (event_end + self.config.post_buffer).max(event_start + SCORING_PLAY_MIN_SPAN)
        } else {
            event_end + self.config.post_buffer
        };

        let duration = self.config.clamp_duration(raw_end - start);
        let segment = Segment::new(
            start,
            start + duration,
            SegmentType::from(moment.kind),
            moment.display_text(),
            scored.importance_score,
        )
        .with_event_range(event_start, event_end);

        Some((raw_end, segment))
    }
}

/// Placeholder used when nothing survived scoring or fallback.
pub fn default_segment() -> Segment {
    Segment::new(
        0.0,
        DEFAULT_SEGMENT_LENGTH,
        SegmentType::Default,
        "Video highlight",
        DEFAULT_SEGMENT_IMPORTANCE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_models::{CandidateMoment, MomentFlags, MomentKind};

    fn packer() -> SegmentPacker {
        SegmentPacker::new(PlannerConfig::default())
    }

    fn ranked_event(t: f64, score: f64, description: &str) -> ScoredMoment {
        let moment = CandidateMoment::new(MomentKind::PointEvent, t, t + 5.0, 0.4)
            .with_description(description);
        ScoredMoment::new(moment, score)
    }

    fn scoring_event(t: f64, player_visible: bool) -> ScoredMoment {
        let moment = CandidateMoment::new(MomentKind::PointEvent, t, t + 5.0, 0.4).with_flags(
            MomentFlags {
                is_successful: true,
                player_visible,
                ..Default::default()
            },
        );
        ScoredMoment::new(moment, 2.0)
    }

    #[test]
    fn test_empty_ranking_yields_default() {
        let segments = packer().pack(&[]);
        assert_eq!(segments.len(), 1);
        let seg = &segments[0];
        assert_eq!(seg.start_time, 0.0);
        assert_eq!(seg.end_time, 10.0);
        assert_eq!(seg.duration, 10.0);
        assert_eq!(seg.segment_type, SegmentType::Default);
    }

    #[test]
    fn test_regular_buffers() {
        let segments = packer().pack(&[ranked_event(20.0, 1.0, "Crossover dribble")]);
        let seg = &segments[0];
        assert_eq!(seg.start_time, 18.0);
        assert_eq!(seg.end_time, 27.0);
        assert_eq!(seg.event_start, 20.0);
        assert_eq!(seg.event_end, 25.0);
        assert_eq!(seg.segment_type, SegmentType::Event);
        assert_eq!(seg.description, "Crossover dribble");
    }

    #[test]
    fn test_scoring_play_lead_in() {
        let visible = packer().pack(&[scoring_event(50.0, true)]);
        assert_eq!(visible[0].start_time, 41.0);
        assert_eq!(visible[0].end_time, 58.0);

        let hidden = packer().pack(&[scoring_event(50.0, false)]);
        assert_eq!(hidden[0].start_time, 42.0);
    }

    #[test]
    fn test_scoring_play_by_keyword() {
        let segments = packer().pack(&[ranked_event(50.0, 1.0, "Three POINT shot")]);
        assert_eq!(segments[0].start_time, 42.0);
    }

    #[test]
    fn test_scoring_play_minimum_span() {
        // Zero-length event: post buffer alone would end at t+2, the minimum span reaches t+8
        let moment = CandidateMoment::new(MomentKind::PointEvent, 30.0, 30.0, 0.4)
            .with_description("Goal!");
        let segments = packer().pack(&[ScoredMoment::new(moment, 1.5)]);
        assert_eq!(segments[0].start_time, 22.0);
        assert_eq!(segments[0].end_time, 38.0);
    }

    #[test]
    fn test_lead_in_clamped_at_zero() {
        let segments = packer().pack(&[scoring_event(3.0, true)]);
        assert_eq!(segments[0].start_time, 0.0);
    }

    #[test]
    fn test_nearby_duplicate_rejected() {
        let ranked = vec![ranked_event(10.0, 1.2, "a"), ranked_event(11.0, 1.0, "b")];
        let segments = packer().pack(&ranked);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].description, "a");
    }

    #[test]
    fn test_tolerance_window() {
        // First: [8, 17]. Second starting at 20 lies within 3s, rejected.
        let ranked = vec![ranked_event(10.0, 1.2, "a"), ranked_event(22.0, 1.0, "b")];
        assert_eq!(packer().pack(&ranked).len(), 1);

        // Second starting at 21.5 clears 17 + 3.
        let ranked = vec![ranked_event(10.0, 1.2, "a"), ranked_event(23.5, 1.0, "b")];
        assert_eq!(packer().pack(&ranked).len(), 2);
    }

    #[test]
    fn test_clamped_reach_counts_as_overlap() {
        // Zero-length shot change at 20 with no buffers clamps to [20, 23);
        // an accepted segment starting at 25 is within tolerance of 23.
        let config = PlannerConfig {
            pre_buffer: 0.0,
            post_buffer: 0.0,
            ..Default::default()
        };
        let later = ScoredMoment::new(
            CandidateMoment::new(MomentKind::PlayInterval, 25.0, 35.0, 0.7),
            0.9,
        );
        let short = ScoredMoment::new(
            CandidateMoment::new(MomentKind::ShotChange, 20.0, 20.0, 0.6),
            0.6,
        );
        let segments = SegmentPacker::new(config).pack(&[later, short]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_time, 25.0);
    }

    #[test]
    fn test_duration_clamped_to_bounds() {
        let long = ScoredMoment::new(
            CandidateMoment::new(MomentKind::PlayInterval, 100.0, 180.0, 0.7),
            0.7,
        );
        let short = ScoredMoment::new(
            CandidateMoment::new(MomentKind::ShotChange, 10.0, 10.0, 0.6),
            0.6,
        );
        let config = PlannerConfig {
            pre_buffer: 0.0,
            post_buffer: 0.0,
            ..Default::default()
        };
        let segments = SegmentPacker::new(config).pack(&[long, short]);
        assert_eq!(segments[0].duration, 30.0);
        assert_eq!(segments[0].end_time, 130.0);
        assert_eq!(segments[1].duration, 3.0);
        assert_eq!(segments[1].end_time, 13.0);
    }

    #[test]
    fn test_budget_respected() {
        let ranked: Vec<ScoredMoment> = (0..20)
            .map(|i| {
                let moment =
                    CandidateMoment::new(MomentKind::PlayInterval, i as f64 * 60.0, i as f64 * 60.0 + 40.0, 0.7);
                ScoredMoment::new(moment, 1.0)
            })
            .collect();
        let segments = packer().pack(&ranked);
        let total: f64 = segments.iter().map(|s| s.duration).sum();
        assert!(total <= 120.0 + 1e-9, "budget exceeded: {}", total);
        assert_eq!(segments.len(), 4);
    }

    #[test]
    fn test_budget_trims_last_segment() {
        let config = PlannerConfig {
            total_duration_cap: 40.0,
            ..Default::default()
        };
        let ranked: Vec<ScoredMoment> = (0..3)
            .map(|i| {
                let moment =
                    CandidateMoment::new(MomentKind::PlayInterval, i as f64 * 60.0, i as f64 * 60.0 + 40.0, 0.7);
                ScoredMoment::new(moment, 1.0)
            })
            .collect();
        let segments = SegmentPacker::new(config).pack(&ranked);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].duration, 30.0);
        assert_eq!(segments[1].duration, 10.0);
    }

    #[test]
    fn test_ranked_order_preserved() {
        let ranked = vec![ranked_event(80.0, 2.0, "late"), ranked_event(10.0, 1.0, "early")];
        let segments = packer().pack(&ranked);
        assert_eq!(segments[0].description, "late");
        assert_eq!(segments[1].description, "early");
    }

    #[test]
    fn test_play_label_used_as_description() {
        let moment =
            CandidateMoment::new(MomentKind::PlayInterval, 5.0, 12.0, 0.7).with_label("fast break");
        let segments = packer().pack(&[ScoredMoment::new(moment, 0.7)]);
        assert_eq!(segments[0].description, "fast break");
        assert_eq!(segments[0].segment_type, SegmentType::Play);
    }
}
