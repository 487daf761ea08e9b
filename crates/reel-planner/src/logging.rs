//! Structured logging for planning runs.
//!
//! Every run gets its own id so log lines from concurrent runs can be told
//! apart. Each stage logs the counts it produced so a thin reel can be traced
//! back to the stage that dropped moments.

use reel_models::{DetectionReport, FallbackTier, HighlightPlan, OrderingMode, PlanSummary};
use tracing::{info, warn, Span};
use uuid::Uuid;

/// Logger carrying the run id and ordering mode on every line.
#[derive(Debug, Clone)]
pub struct PlanLogger {
    run_id: String,
    ordering: OrderingMode,
}

impl PlanLogger {
    /// Create a logger with a fresh run id.
    pub fn new(ordering: OrderingMode) -> Self {
        Self::with_run_id(&Uuid::new_v4().to_string(), ordering)
    }

    /// Create a logger for an existing run id.
    pub fn with_run_id(run_id: &str, ordering: OrderingMode) -> Self {
        Self {
            run_id: run_id.to_string(),
            ordering,
        }
    }

    /// Log the detector signals a run starts from. Warns when there are none.
    pub fn log_report(&self, report: &DetectionReport) {
        if report.is_empty() {
            warn!(
                run_id = %self.run_id,
                "Detection report is empty, only fallbacks can produce segments"
            );
            return;
        }

        info!(
            run_id = %self.run_id,
            events = report.point_events.len(),
            plays = report.play_intervals.len(),
            shot_changes = report.shot_changes.len(),
            "Planning started"
        );
    }

    pub fn log_ranked(&self, found: usize, ranked: usize) {
        info!(
            run_id = %self.run_id,
            found,
            ranked,
            dropped = found.saturating_sub(ranked),
            "Moments ranked"
        );
    }

    pub fn log_fallback(&self, tier: FallbackTier, moments: usize) {
        warn!(
            run_id = %self.run_id,
            tier = %tier,
            moments,
            "Scoring left nothing, using fallback"
        );
    }

    pub fn log_completion(&self, plan: &HighlightPlan, summary: &PlanSummary) {
        info!(
            run_id = %self.run_id,
            ordering = %self.ordering,
            segments = plan.highlight_count,
            total_duration = plan.total_duration,
            fallback = summary.fallback.map(|t| t.as_str()).unwrap_or("none"),
            ending_added = summary.ending_added,
            video_duration = summary.video_duration,
            "Planning completed"
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn ordering(&self) -> OrderingMode {
        self.ordering
    }

    /// Span that scopes every log line of the run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "plan",
            run_id = %self.run_id,
            ordering = %self.ordering
        )
    }
}
