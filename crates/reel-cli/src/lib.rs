//! Support code for the `reel-plan` binary.

pub mod input;
pub mod output;

pub use input::{load_report, resolve_video_duration};
pub use output::write_output;
