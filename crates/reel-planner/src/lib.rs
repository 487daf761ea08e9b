//! Highlight reel planning engine.
//!
//! This crate turns detector output into an editing plan:
//! - Candidate collection from point events, play intervals and shot changes
//! - Importance scoring with injectable randomness
//! - Fallback tiers when scoring leaves nothing
//! - Budgeted, non-overlapping segment packing
//! - A guaranteed closing segment
//!
//! # Example
//!
//! ```no_run
//! use reel_models::DetectionReport;
//! use reel_planner::{HighlightPlanner, KnownDuration, PlannerConfig, RngSource};
//!
//! let planner = HighlightPlanner::new(PlannerConfig::default())?;
//! let report = DetectionReport::default();
//! let output = planner.plan(&report, &KnownDuration(600.0), &mut RngSource::seeded(7));
//! println!("{} segments", output.plan.highlight_count);
//! # Ok::<(), reel_planner::PlannerError>(())
//! ```

pub mod collector;
pub mod config;
pub mod duration;
pub mod ending;
pub mod error;
pub mod fallback;
pub mod logging;
pub mod packer;
pub mod planner;
pub mod random;
pub mod scorer;

pub use collector::MomentCollector;
pub use config::PlannerConfig;
pub use duration::{resolve_duration, DurationLookup, KnownDuration, UnknownDuration};
pub use ending::EndingGuarantee;
pub use error::{PlannerError, PlannerResult};
pub use fallback::FallbackChain;
pub use logging::PlanLogger;
pub use packer::SegmentPacker;
pub use planner::{order_segments, HighlightPlanner};
pub use random::{FixedRandom, NoRandom, RandomSource, RngSource};
pub use scorer::MomentScorer;
