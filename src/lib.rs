#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod cells;
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod recognize;
pub mod types;

// Stage building blocks; public for tools and tests, not a stable API.
pub mod angle;
pub mod binarize;
pub mod deskew;
pub mod edges;
pub mod filters;
pub mod grid;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

pub use crate::cells::{reading_order, sequence_cell_files, Cell, CellCollection, CellRecord};
pub use crate::config::{ArtifactOptions, RunConfig};
pub use crate::detector::{BatchJob, BatchOutcome, GridSegmenter, Segmentation, SegmentationParams};
pub use crate::diagnostics::SegmentationReport;
pub use crate::error::{DetectionFailure, GridError, Result};
pub use crate::image::RasterImage;
pub use crate::recognize::{recognize_sheet, CellClassifier, ClassIndex, Prediction};
pub use crate::types::{CellBox, CellId, DeskewMethod, GridLineSet, SkewEstimate};

/// Small prelude for quick experiments.
///
/// ```no_run
/// use manuscript_grid::prelude::*;
/// use std::path::Path;
///
/// # fn main() -> manuscript_grid::Result<()> {
/// let segmenter = GridSegmenter::new(SegmentationParams::default().with_tol(12))?;
/// let page = segmenter.segment_file(Path::new("sheet.png"))?;
/// for cell in page.cells().reading_order() {
///     println!("{} at {:?}", cell.id, cell.bbox);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::io::load_grayscale_image;
    pub use crate::{
        ArtifactOptions, CellId, GridSegmenter, RasterImage, Segmentation, SegmentationParams,
    };
}

// --- Stage-level API (for tools & advanced users) ---------------------------

pub mod stages {
    pub use crate::binarize::{adaptive_threshold, ThresholdParams};
    pub use crate::deskew::{estimate_skew, projection_profile_skew, rotate, LineVote};
    pub use crate::diagnostics::{render_grid_mask, render_intersections, StageTiming, TimingBreakdown};
    pub use crate::edges::{canny, CannyParams};
    pub use crate::grid::{cluster_coordinates, detect_grid_lines, GridDetection};
    pub use crate::segments::{hough_segments, HoughParams, LineSegment};
}
