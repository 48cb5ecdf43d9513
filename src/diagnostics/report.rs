use super::TimingBreakdown;
use crate::types::{GridLineSet, SkewEstimate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of one segmentation run, written as `report.json`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    pub source_size: [usize; 2],
    pub deskewed_size: [usize; 2],
    pub skew: SkewEstimate,
    /// Segments found by the skew pass.
    pub skew_segments: usize,
    /// Angles admitted to the skew vote.
    pub skew_votes: usize,
    /// Segments found by the grid pass.
    pub grid_segments: usize,
    pub vertical_samples: usize,
    pub horizontal_samples: usize,
    pub oblique_segments: usize,
    pub grid: GridLineSet,
    pub rows: usize,
    pub cols: usize,
    pub cells: usize,
    pub timings: TimingBreakdown,
}
