//! Detection report loading and duration resolution.

use anyhow::Context;
use reel_models::DetectionReport;
use std::path::{Path, PathBuf};

/// Read a detection report from a JSON file.
pub fn load_report(path: impl AsRef<Path>) -> anyhow::Result<DetectionReport> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read detection report {}", path.display()))?;
    let report: DetectionReport = serde_json::from_str(&raw)
        .with_context(|| format!("invalid detection report {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        events = report.point_events.len(),
        plays = report.play_intervals.len(),
        shot_changes = report.shot_changes.len(),
        "Loaded detection report"
    );

    Ok(report)
}

/// Work out the video duration.
///
/// An explicit value wins, then the duration stored in the report, then an
/// ffprobe lookup of `video` (or the report's `video_path`). Probe failures
/// are logged and yield `None`; the planner treats that as unknown.
pub async fn resolve_video_duration(
    explicit: Option<f64>,
    report: &DetectionReport,
    video: Option<&Path>,
) -> Option<f64> {
    if let Some(duration) = explicit {
        return Some(duration);
    }

    if let Some(duration) = report.duration {
        return Some(duration);
    }

    let path = video
        .map(Path::to_path_buf)
        .or_else(|| report.video_path.as_ref().map(PathBuf::from))?;

    match reel_media::get_duration(&path).await {
        Ok(duration) => {
            tracing::debug!(path = %path.display(), duration, "Probed video duration");
            Some(duration)
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Could not probe video duration, treating it as unknown"
            );
            None
        }
    }
}
