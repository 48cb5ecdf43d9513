//! Grid-line detection on a deskewed page.
//!
//! - [`lines`]: Hough segments classified as horizontal or vertical and
//!   reduced to raw line-position samples.
//! - [`cluster1d`]: merges raw samples of the same printed rule into one
//!   canonical coordinate.

pub mod cluster1d;
pub mod lines;

pub use cluster1d::cluster_coordinates;
pub use lines::{classify_segments, detect_grid_lines, GridDetection, RawLineSamples};
