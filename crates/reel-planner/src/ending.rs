//! Ending guarantee.
//!
//! Every reel must show how the game finished. If no packed segment reaches
//! the closing window, a synthetic segment over the last seconds of the video
//! is appended. It is exempt from the duration budget.

use reel_models::{Segment, SegmentType};

use crate::config::PlannerConfig;

pub const ENDING_IMPORTANCE: f64 = 0.9;
pub const ENDING_DESCRIPTION: &str = "Final moments / Last play";

/// Appends a closing segment when the packed reel misses the end of the video.
#[derive(Debug, Clone)]
pub struct EndingGuarantee {
    coverage_window: f64,
    segment_length: f64,
    min_length: f64,
}

impl EndingGuarantee {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            coverage_window: config.ending_coverage_window,
            segment_length: config.ending_segment_length,
            min_length: config.ending_min_length,
        }
    }

    /// True if some segment already reaches the closing window.
    pub fn is_covered(&self, segments: &[Segment], video_duration: f64) -> bool {
        segments
            .iter()
            .any(|s| s.end_time >= video_duration - self.coverage_window)
    }

    /// Closing segment to append, or `None` if the ending is covered or the
    /// duration is unknown.
    pub fn closing_segment(&self, segments: &[Segment], video_duration: f64) -> Option<Segment> {
        if video_duration <= 0.0 {
            return None;
        }

        if self.is_covered(segments, video_duration) {
            return None;
        }

        let mut start = (video_duration - self.segment_length).max(0.0);
        for segment in segments {
            if segment.end_time > start {
                start = segment.end_time + 1.0;
            }
        }
        start = start.min(video_duration - self.min_length).max(0.0);

        if video_duration <= start {
            return None;
        }

        Some(Segment::new(
            start,
            video_duration,
            SegmentType::Ending,
            ENDING_DESCRIPTION,
            ENDING_IMPORTANCE,
        ))
    }

    /// Append the closing segment if needed. Returns whether one was added.
    pub fn apply(&self, segments: &mut Vec<Segment>, video_duration: f64) -> bool {
        match self.closing_segment(segments, video_duration) {
            Some(ending) => {
                tracing::info!(
                    range = %ending.time_range(),
                    "Adding ending segment to highlights"
                );
                segments.push(ending);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guarantee() -> EndingGuarantee {
        EndingGuarantee::new(&PlannerConfig::default())
    }

    fn seg(start: f64, end: f64) -> Segment {
        Segment::new(start, end, SegmentType::Event, "", 1.0)
    }

    #[test]
    fn test_unknown_duration_is_noop() {
        let mut segments = vec![seg(0.0, 10.0)];
        assert!(!guarantee().apply(&mut segments, 0.0));
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_already_covered() {
        let mut segments = vec![seg(70.0, 80.0)];
        assert!(!guarantee().apply(&mut segments, 100.0));
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_appends_last_fifteen_seconds() {
        let mut segments = vec![seg(10.0, 20.0)];
        assert!(guarantee().apply(&mut segments, 100.0));
        let ending = segments.last().unwrap();
        assert_eq!(ending.segment_type, SegmentType::Ending);
        assert_eq!(ending.start_time, 85.0);
        assert_eq!(ending.end_time, 100.0);
        assert_eq!(ending.duration, 15.0);
        assert_eq!(ending.importance, ENDING_IMPORTANCE);
    }

    #[test]
    fn test_shifts_past_overlapping_segment() {
        let segments = vec![seg(150.0, 186.0)];
        let ending = guarantee().closing_segment(&segments, 210.0).unwrap();
        // Window would start at 195; the segment ends at 186 so no shift
        assert_eq!(ending.start_time, 195.0);

        let segments = vec![seg(170.0, 187.0)];
        let config = PlannerConfig {
            ending_coverage_window: 5.0,
            ..Default::default()
        };
        let ending = EndingGuarantee::new(&config)
            .closing_segment(&segments, 200.0)
            .unwrap();
        // Window would start at 185 but the segment runs to 187
        assert_eq!(ending.start_time, 188.0);
        assert_eq!(ending.end_time, 200.0);
    }

    #[test]
    fn test_start_capped_to_minimum_length() {
        let segments = vec![seg(170.0, 194.0)];
        let config = PlannerConfig {
            ending_coverage_window: 5.0,
            ..Default::default()
        };
        let ending = EndingGuarantee::new(&config)
            .closing_segment(&segments, 200.0)
            .unwrap();
        // Shift would give 195; the closing segment keeps at least 10 seconds
        assert_eq!(ending.start_time, 190.0);
        assert_eq!(ending.duration, 10.0);
    }

    #[test]
    fn test_short_video() {
        let ending = guarantee().closing_segment(&[], 6.0).unwrap();
        assert_eq!(ending.start_time, 0.0);
        assert_eq!(ending.end_time, 6.0);
    }
}
