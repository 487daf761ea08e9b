//! Moment scoring.
//!
//! Each candidate starts at its confidence and moves through a fixed sequence
//! of boosts and penalties. Score changes dominate, then close-game context,
//! then ending position; keyword and crowd signals are secondary. Clear misses
//! with a quiet crowd are dropped, and anything left below
//! [`MIN_SCORE`] is discarded before the action boost and jitter are applied.
//!
//! # Ranking
//! Survivors are sorted by score, highest first, ties kept in input order.
//! With more than three survivors, ranks #2 and #3 are swapped with
//! probability [`TOP_SWAP_PROBABILITY`] so repeated runs vary their top picks.

use reel_models::{CandidateMoment, ScoredMoment};

use crate::random::RandomSource;

pub const SCORE_CHANGE_BOOST: f64 = 1.0;
pub const CLOSE_GAME_BOOST: f64 = 0.6;
/// Extra boost when a score change happens in a close game.
pub const CLOSE_GAME_SCORE_BOOST: f64 = 0.5;
pub const ENDING_SCORE_CHANGE_BOOST: f64 = 0.5;
pub const ENDING_BOOST: f64 = 0.3;
/// Penalty for a miss that still got the crowd going.
pub const MISS_PENALTY: f64 = 0.3;
pub const KEYWORD_BOOST: f64 = 0.4;
pub const LOUD_CROWD_BOOST: f64 = 0.2;
pub const LIVELY_CROWD_BOOST: f64 = 0.1;
pub const ACTION_BOOST: f64 = 0.2;

/// Candidates scoring below this (before the action boost) are dropped.
pub const MIN_SCORE: f64 = 0.2;

/// Half-width of the uniform diversity jitter.
pub const JITTER_AMPLITUDE: f64 = 0.05;

pub const TOP_SWAP_PROBABILITY: f64 = 0.3;

/// Crowd reaction at or above which a miss is penalized instead of dropped.
pub const MISS_EXCITEMENT_THRESHOLD: u8 = 3;

const LOUD_CROWD: u8 = 8;
const LIVELY_CROWD: u8 = 6;

const MISS_WORDS: [&str; 3] = ["missed", "blocked", "failed"];

const SCORING_KEYWORDS: [&str; 8] = [
    "goal",
    "touchdown",
    "dunk",
    "home run",
    "score",
    "basket",
    "made",
    "scored",
];

/// Converts candidates into ranked, scored moments.
#[derive(Debug, Clone, Default)]
pub struct MomentScorer;

impl MomentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score and rank candidates, highest first.
    pub fn score(
        &self,
        candidates: Vec<CandidateMoment>,
        rng: &mut dyn RandomSource,
    ) -> Vec<ScoredMoment> {
        let total = candidates.len();
        let mut scored: Vec<ScoredMoment> = candidates
            .into_iter()
            .filter_map(|moment| {
                let base = self.rate(&moment)?;
                let score = base + rng.jitter(JITTER_AMPLITUDE);
                Some(ScoredMoment::new(moment, score))
            })
            .collect();

        // Stable sort keeps input order for ties
        scored.sort_by(|a, b| b.importance_score.total_cmp(&a.importance_score));

        if scored.len() > 3 && rng.chance(TOP_SWAP_PROBABILITY) {
            tracing::debug!("Swapping ranks #2 and #3 for variety");
            scored.swap(1, 2);
        }

        tracing::debug!(
            candidates = total,
            ranked = scored.len(),
            dropped = total - scored.len(),
            "Scored candidate moments"
        );

        scored
    }

    /// Deterministic score for one candidate, before jitter.
    ///
    /// Returns `None` when the candidate is filtered out.
    pub fn rate(&self, moment: &CandidateMoment) -> Option<f64> {
        let flags = &moment.flags;
        let mut score = moment.confidence;

        let is_score_change = moment.is_score_change();
        if is_score_change {
            score += SCORE_CHANGE_BOOST;
        }

        if flags.is_close_game {
            score += CLOSE_GAME_BOOST;
        }

        if is_score_change && flags.is_close_game {
            score += CLOSE_GAME_SCORE_BOOST;
        }

        if flags.is_ending {
            score += if is_score_change {
                ENDING_SCORE_CHANGE_BOOST
            } else {
                ENDING_BOOST
            };
        }

        let description = moment.description.to_lowercase();
        if MISS_WORDS.iter().any(|w| description.contains(w))
            && !flags.is_successful
            && !is_score_change
            && description.contains("missed")
        {
            if moment.crowd_reaction < MISS_EXCITEMENT_THRESHOLD {
                tracing::trace!(start = moment.start_time, "Dropping missed attempt");
                return None;
            }
            score -= MISS_PENALTY;
        }

        let label = moment.label.to_lowercase();
        let has_keyword = SCORING_KEYWORDS
            .iter()
            .any(|k| label.contains(k) || description.contains(k));
        if has_keyword && !label.contains("miss") && !description.contains("miss") {
            score += KEYWORD_BOOST;
        }

        if moment.crowd_reaction >= LOUD_CROWD {
            score += LOUD_CROWD_BOOST;
        } else if moment.crowd_reaction >= LIVELY_CROWD {
            score += LIVELY_CROWD_BOOST;
        }

        if score < MIN_SCORE {
            return None;
        }

        if flags.has_action {
            score += ACTION_BOOST;
        }

        Some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, NoRandom};
    use reel_models::{MomentFlags, MomentKind};

    fn event(confidence: f64, description: &str) -> CandidateMoment {
        CandidateMoment::new(MomentKind::PointEvent, 10.0, 15.0, confidence)
            .with_description(description)
    }

    fn with_flags(moment: CandidateMoment, flags: MomentFlags) -> CandidateMoment {
        moment.with_flags(flags)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_plain_confidence() {
        let scorer = MomentScorer::new();
        assert_close(scorer.rate(&event(0.5, "")).unwrap(), 0.5);
    }

    #[test]
    fn test_score_change_dominates() {
        let scorer = MomentScorer::new();
        let plain = event(0.4, "");
        let scoring = with_flags(
            event(0.4, ""),
            MomentFlags {
                is_score_change: true,
                ..Default::default()
            },
        );
        let diff = scorer.rate(&scoring).unwrap() - scorer.rate(&plain).unwrap();
        assert_close(diff, 1.0);
    }

    #[test]
    fn test_close_game_stacking() {
        let scorer = MomentScorer::new();
        let m = with_flags(
            event(0.4, ""),
            MomentFlags {
                is_successful: true,
                is_close_game: true,
                ..Default::default()
            },
        );
        // 0.4 + 1.0 + 0.6 + 0.5
        assert_close(scorer.rate(&m).unwrap(), 2.5);
    }

    #[test]
    fn test_ending_boosts() {
        let scorer = MomentScorer::new();
        let ending = with_flags(
            event(0.4, ""),
            MomentFlags {
                is_ending: true,
                ..Default::default()
            },
        );
        assert_close(scorer.rate(&ending).unwrap(), 0.7);

        let ending_score = with_flags(
            event(0.4, ""),
            MomentFlags {
                is_ending: true,
                is_score_change: true,
                ..Default::default()
            },
        );
        assert_close(scorer.rate(&ending_score).unwrap(), 1.9);
    }

    #[test]
    fn test_quiet_miss_dropped() {
        let scorer = MomentScorer::new();
        let miss = event(0.9, "Shot missed off the rim").with_crowd_reaction(2);
        assert!(scorer.rate(&miss).is_none());
    }

    #[test]
    fn test_exciting_miss_penalized() {
        let scorer = MomentScorer::new();
        let miss = event(0.9, "Shot missed at the buzzer").with_crowd_reaction(5);
        assert_close(scorer.rate(&miss).unwrap(), 0.6);
    }

    #[test]
    fn test_blocked_without_missed_not_penalized() {
        let scorer = MomentScorer::new();
        let block = event(0.5, "Shot blocked at the rim").with_crowd_reaction(0);
        assert_close(scorer.rate(&block).unwrap(), 0.5);
    }

    #[test]
    fn test_successful_miss_text_kept() {
        let scorer = MomentScorer::new();
        let m = with_flags(
            event(0.4, "missed the first, then scored the putback"),
            MomentFlags {
                is_successful: true,
                ..Default::default()
            },
        )
        .with_crowd_reaction(0);
        // Score change boost, no keyword boost because the text mentions a miss
        assert_close(scorer.rate(&m).unwrap(), 1.4);
    }

    #[test]
    fn test_keyword_boost_from_label() {
        let scorer = MomentScorer::new();
        let play = CandidateMoment::new(MomentKind::PlayInterval, 0.0, 8.0, 0.7).with_label("Goal");
        assert_close(scorer.rate(&play).unwrap(), 1.1);
    }

    #[test]
    fn test_crowd_boost_tiers() {
        let scorer = MomentScorer::new();
        assert_close(scorer.rate(&event(0.4, "").with_crowd_reaction(9)).unwrap(), 0.6);
        assert_close(scorer.rate(&event(0.4, "").with_crowd_reaction(6)).unwrap(), 0.5);
        assert_close(scorer.rate(&event(0.4, "").with_crowd_reaction(5)).unwrap(), 0.4);
    }

    #[test]
    fn test_min_score_filter_before_action_boost() {
        let scorer = MomentScorer::new();
        let weak = with_flags(
            event(0.1, ""),
            MomentFlags {
                has_action: true,
                ..Default::default()
            },
        );
        // 0.1 < 0.2 is dropped even though the action boost would lift it
        assert!(scorer.rate(&weak).is_none());

        let ok = with_flags(
            event(0.2, ""),
            MomentFlags {
                has_action: true,
                ..Default::default()
            },
        );
        assert_close(scorer.rate(&ok).unwrap(), 0.4);
    }

    #[test]
    fn test_jitter_does_not_revive_filtered() {
        let scorer = MomentScorer::new();
        let mut rng = FixedRandom::new(0.05, false);
        let ranked = scorer.score(vec![event(0.19, "")], &mut rng);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let scorer = MomentScorer::new();
        let candidates = vec![
            event(0.3, "first"),
            event(0.9, "best"),
            event(0.3, "second"),
        ];
        let ranked = scorer.score(candidates, &mut NoRandom);
        let order: Vec<_> = ranked.iter().map(|s| s.moment.description.as_str()).collect();
        assert_eq!(order, vec!["best", "first", "second"]);
    }

    #[test]
    fn test_rank_swap_requires_more_than_three() {
        let scorer = MomentScorer::new();
        let three = vec![event(0.9, "a"), event(0.8, "b"), event(0.7, "c")];
        let ranked = scorer.score(three, &mut FixedRandom::new(0.0, true));
        let order: Vec<_> = ranked.iter().map(|s| s.moment.description.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);

        let four = vec![
            event(0.9, "a"),
            event(0.8, "b"),
            event(0.7, "c"),
            event(0.6, "d"),
        ];
        let ranked = scorer.score(four, &mut FixedRandom::new(0.0, true));
        let order: Vec<_> = ranked.iter().map(|s| s.moment.description.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_jitter_applied() {
        let scorer = MomentScorer::new();
        let ranked = scorer.score(vec![event(0.5, "")], &mut FixedRandom::new(-0.05, false));
        assert_close(ranked[0].importance_score, 0.45);
    }

    /// Records every draw and never perturbs the ranking.
    #[derive(Default)]
    struct RecordingRandom {
        jitter_calls: Vec<f64>,
        chance_calls: Vec<f64>,
    }

    impl RandomSource for RecordingRandom {
        fn jitter(&mut self, amplitude: f64) -> f64 {
            self.jitter_calls.push(amplitude);
            0.0
        }

        fn chance(&mut self, probability: f64) -> bool {
            self.chance_calls.push(probability);
            false
        }
    }

    #[test]
    fn test_random_draws_per_survivor() {
        let scorer = MomentScorer::new();
        let candidates = vec![
            event(0.9, "a"),
            event(0.8, "b"),
            event(0.1, "filtered"),
            event(0.7, "c"),
            event(0.6, "d"),
        ];
        let mut rng = RecordingRandom::default();
        let ranked = scorer.score(candidates, &mut rng);

        assert_eq!(ranked.len(), 4);
        assert_eq!(rng.jitter_calls, vec![JITTER_AMPLITUDE; 4]);
        assert_eq!(rng.jitter_calls, vec![0.05; 4]);
        assert_eq!(rng.chance_calls, vec![TOP_SWAP_PROBABILITY]);
        assert_eq!(rng.chance_calls, vec![0.3]);
    }

    #[test]
    fn test_no_swap_draw_with_three_survivors() {
        let scorer = MomentScorer::new();
        let candidates = vec![event(0.9, "a"), event(0.8, "b"), event(0.7, "c")];
        let mut rng = RecordingRandom::default();
        scorer.score(candidates, &mut rng);

        assert_eq!(rng.jitter_calls.len(), 3);
        assert!(rng.chance_calls.is_empty());
    }
}
