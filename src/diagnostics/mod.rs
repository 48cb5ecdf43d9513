//! Run diagnostics: stage timings, debug renderings and the JSON report.
//!
//! Nothing here affects segmentation results; these are side outputs for
//! inspecting a run after the fact.

pub mod artifacts;
mod report;
pub mod timing;

pub use artifacts::{render_grid_mask, render_intersections};
pub use report::SegmentationReport;
pub use timing::{StageTiming, TimingBreakdown};
