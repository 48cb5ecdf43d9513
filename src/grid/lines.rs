use super::cluster1d::cluster_coordinates;
use crate::detector::SegmentationParams;
use crate::edges::canny;
use crate::error::{DetectionFailure, GridError, Result};
use crate::image::RasterImage;
use crate::segments::{hough_segments, LineSegment};
use crate::types::GridLineSet;
use log::debug;

/// Raw per-segment line positions before clustering.
#[derive(Clone, Debug, Default)]
pub struct RawLineSamples {
    /// Horizontal midpoints of vertical segments.
    pub xs: Vec<i32>,
    /// Vertical midpoints of horizontal segments.
    pub ys: Vec<i32>,
    /// Segments too oblique to be either.
    pub discarded: usize,
}

/// Split segments into horizontal and vertical samples by absolute angle.
///
/// `|angle| <= ang_thr` is horizontal, `|angle| >= 90 - ang_thr` vertical,
/// anything in between is noise.
pub fn classify_segments(segments: &[LineSegment], ang_thr: f32) -> RawLineSamples {
    let mut samples = RawLineSamples::default();
    for seg in segments {
        let angle = seg.angle_deg().abs();
        let (mx, my) = seg.midpoint();
        if angle <= ang_thr {
            samples.ys.push(my);
        } else if angle >= 90.0 - ang_thr {
            samples.xs.push(mx);
        } else {
            samples.discarded += 1;
        }
    }
    samples
}

/// Detector output: canonical grid plus the evidence it came from.
#[derive(Clone, Debug)]
pub struct GridDetection {
    pub grid: GridLineSet,
    pub segments: Vec<LineSegment>,
    pub samples: RawLineSamples,
}

/// Detect and cluster grid lines on a deskewed grayscale page.
pub fn detect_grid_lines(gray: &RasterImage, params: &SegmentationParams) -> Result<GridDetection> {
    let edges = canny(gray, params.canny);
    let segments = hough_segments(&edges, params.grid_hough);
    if segments.len() < params.min_segments {
        return Err(GridError::Detection(DetectionFailure::InsufficientLines {
            found: segments.len(),
            required: params.min_segments,
        }));
    }

    let samples = classify_segments(&segments, params.ang_thr);
    let grid = GridLineSet {
        xs: cluster_coordinates(&samples.xs, params.tol),
        ys: cluster_coordinates(&samples.ys, params.tol),
    };
    debug!(
        "grid lines: {} segments -> {} vertical / {} horizontal samples ({} oblique) -> {} xs, {} ys",
        segments.len(),
        samples.xs.len(),
        samples.ys.len(),
        samples.discarded,
        grid.xs.len(),
        grid.ys.len()
    );

    if grid.xs.len() < 2 || grid.ys.len() < 2 {
        return Err(GridError::Detection(DetectionFailure::InsufficientGrid {
            xs: grid.xs.len(),
            ys: grid.ys.len(),
        }));
    }

    Ok(GridDetection {
        grid,
        segments,
        samples,
    })
}
