//! Highlight planning pipeline.
//!
//! Collect → score → fallback → pack → ending guarantee → ordering.

use reel_models::{
    DetectionReport, FallbackTier, HighlightPlan, OrderingMode, PlanSummary, PlannerOutput,
    Segment, SegmentType,
};

use crate::collector::MomentCollector;
use crate::config::PlannerConfig;
use crate::duration::{resolve_duration, DurationLookup};
use crate::ending::EndingGuarantee;
use crate::error::PlannerResult;
use crate::fallback::FallbackChain;
use crate::logging::PlanLogger;
use crate::packer::SegmentPacker;
use crate::random::RandomSource;
use crate::scorer::MomentScorer;

/// Turns a detection report into an ordered editing plan.
#[derive(Debug, Clone)]
pub struct HighlightPlanner {
    config: PlannerConfig,
    collector: MomentCollector,
    scorer: MomentScorer,
    fallback: FallbackChain,
    packer: SegmentPacker,
    ending: EndingGuarantee,
}

impl HighlightPlanner {
    /// Build a planner, rejecting invalid configuration.
    pub fn new(config: PlannerConfig) -> PlannerResult<Self> {
        config.validate()?;

        Ok(Self {
            collector: MomentCollector::new(&config),
            scorer: MomentScorer::new(),
            fallback: FallbackChain::new(),
            packer: SegmentPacker::new(config.clone()),
            ending: EndingGuarantee::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a reel. Never fails: missing data degrades to fallbacks and,
    /// at worst, the single default segment.
    pub fn plan(
        &self,
        report: &DetectionReport,
        durations: &dyn DurationLookup,
        rng: &mut dyn RandomSource,
    ) -> PlannerOutput {
        let logger = PlanLogger::new(self.config.ordering);
        let _span = logger.create_span().entered();

        logger.log_report(report);

        let collect_duration = resolve_duration(durations);
        let candidates = self.collector.collect(
            &report.point_events,
            &report.play_intervals,
            &report.shot_changes,
            collect_duration,
        );
        let total_moments_found = candidates.len();

        let mut ranked = self.scorer.score(candidates, rng);
        let moments_ranked = ranked.len();
        logger.log_ranked(total_moments_found, moments_ranked);

        let mut fallback = None;
        if ranked.is_empty() {
            match self.fallback.run(report, collect_duration) {
                Some((tier, moments)) => {
                    logger.log_fallback(tier, moments.len());
                    fallback = Some(tier);
                    ranked = moments;
                }
                None => {
                    logger.log_fallback(FallbackTier::DefaultSegment, 0);
                    fallback = Some(FallbackTier::DefaultSegment);
                }
            }
        }

        let mut segments = self.packer.pack(&ranked);

        let ending_duration = resolve_duration(durations);
        let ending_added = self.ending.apply(&mut segments, ending_duration);

        order_segments(&mut segments, self.config.ordering);

        let plan = HighlightPlan::new(segments, self.config.ordering);

        let mut summary = PlanSummary::new(total_moments_found, moments_ranked, plan.highlight_count);
        summary.fallback = fallback;
        summary.ending_added = ending_added;
        summary.video_duration = ending_duration;

        logger.log_completion(&plan, &summary);

        PlannerOutput { plan, summary }
    }
}

/// Arrange segments for playback.
pub fn order_segments(segments: &mut Vec<Segment>, ordering: OrderingMode) {
    match ordering {
        OrderingMode::Chronological => {
            segments.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        }
        OrderingMode::Importance => move_ending_last(segments),
        OrderingMode::Dramatic => {
            segments.sort_by(|a, b| a.importance.total_cmp(&b.importance));
            move_ending_last(segments);
        }
    }
}

fn move_ending_last(segments: &mut Vec<Segment>) {
    if let Some(pos) = segments
        .iter()
        .position(|s| s.segment_type == SegmentType::Ending)
    {
        let ending = segments.remove(pos);
        segments.push(ending);
    }
}
