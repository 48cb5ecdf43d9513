//! Page segmentation: parameters, pipeline and run workspace.
//!
//! - [`params`]: tunable knobs with validated ranges.
//! - `pipeline`: the [`GridSegmenter`] driving skew estimation, rotation,
//!   grid detection and cell extraction, plus batch processing.
//! - `workspace`: [`RunWorkspace`], a temporary directory released on drop.

pub mod params;
mod pipeline;
mod workspace;

pub use params::{SegmentationParams, MAX_SKEW_LIMIT, MAX_TOL};
pub use pipeline::{
    check_distinct_outputs, BatchJob, BatchOutcome, GridSegmenter, Segmentation, CELLS_DIR, CELLS_JSON, DESKEWED_PREVIEW,
    GRID_MASK, INTERSECTIONS, REPORT_JSON, SKEW_DEBUG,
};
pub use workspace::RunWorkspace;
