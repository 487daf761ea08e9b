//! Video metadata lookups for the reel planner.
//!
//! Wraps `ffprobe` to read the source duration used for ending detection
//! and timeline fallbacks.

pub mod error;
pub mod probe;

pub use error::{MediaError, MediaResult};
pub use probe::{get_duration, parse_probe_output, probe_video, VideoMetadata};
