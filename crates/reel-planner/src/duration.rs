//! Video duration lookups.
//!
//! The planner asks for the source duration twice: once while collecting
//! moments (ending detection) and once for the ending guarantee. Lookups are
//! infallible from the planner's point of view; anything unusable means
//! "unknown" and is treated as a duration of zero.

/// Source of the total video duration.
pub trait DurationLookup {
    /// Duration in seconds, `None` if it could not be determined.
    fn video_duration(&self) -> Option<f64>;
}

/// A duration that is already known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownDuration(pub f64);

impl DurationLookup for KnownDuration {
    fn video_duration(&self) -> Option<f64> {
        Some(self.0)
    }
}

/// No duration information available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownDuration;

impl DurationLookup for UnknownDuration {
    fn video_duration(&self) -> Option<f64> {
        None
    }
}

impl DurationLookup for f64 {
    fn video_duration(&self) -> Option<f64> {
        Some(*self)
    }
}

impl<T: DurationLookup> DurationLookup for Option<T> {
    fn video_duration(&self) -> Option<f64> {
        self.as_ref().and_then(|d| d.video_duration())
    }
}

/// Resolve a lookup to seconds, degrading to 0 for unknown or unusable values.
pub fn resolve_duration(lookup: &dyn DurationLookup) -> f64 {
    match lookup.video_duration() {
        Some(d) if d.is_finite() && d > 0.0 => d,
        Some(d) => {
            tracing::debug!(duration = d, "Ignoring unusable video duration");
            0.0
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known() {
        assert_eq!(resolve_duration(&KnownDuration(95.5)), 95.5);
        assert_eq!(resolve_duration(&120.0), 120.0);
    }

    #[test]
    fn test_resolve_unknown_degrades_to_zero() {
        assert_eq!(resolve_duration(&UnknownDuration), 0.0);
        assert_eq!(resolve_duration(&None::<KnownDuration>), 0.0);
        assert_eq!(resolve_duration(&KnownDuration(-3.0)), 0.0);
        assert_eq!(resolve_duration(&KnownDuration(f64::NAN)), 0.0);
    }
}
