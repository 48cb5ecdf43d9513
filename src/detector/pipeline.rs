//! Segmentation pipeline driving one page end to end.
//!
//! [`GridSegmenter`] binarizes the page, estimates and corrects skew, detects
//! and clusters the printed grid, then cuts cells. Everything up to
//! [`Segmentation::write_to`] happens in memory, so input and detection
//! failures never leave partial artifacts behind.
//!
//! ```no_run
//! use manuscript_grid::{ArtifactOptions, GridSegmenter, SegmentationParams};
//! use std::path::Path;
//!
//! # fn main() -> manuscript_grid::Result<()> {
//! let segmenter = GridSegmenter::new(SegmentationParams::default())?;
//! let mut page = segmenter.segment_file(Path::new("sheet.jpg"))?;
//! let records = page.write_to(Path::new("out"), &ArtifactOptions::default())?;
//! println!("{} cells, skew {:.2}°", records.len(), page.skew().angle);
//! # Ok(())
//! # }
//! ```
use super::params::SegmentationParams;
use crate::binarize::adaptive_threshold;
use crate::cells::{extract_cells, CellCollection, CellRecord};
use crate::config::ArtifactOptions;
use crate::deskew::{estimate_skew, rotate, LineVote};
use crate::diagnostics::{render_grid_mask, render_intersections, SegmentationReport, TimingBreakdown};
use crate::error::{GridError, Result};
use crate::grid::{detect_grid_lines, GridDetection};
use crate::image::io::{load_grayscale_image, save_raster, write_json_file, write_text_file};
use crate::image::{ImageView, RasterImage};
use crate::types::{GridLineSet, SkewEstimate};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DESKEWED_PREVIEW: &str = "deskewed_preview.png";
pub const SKEW_DEBUG: &str = "skew_debug.txt";
pub const GRID_MASK: &str = "grid_mask.png";
pub const INTERSECTIONS: &str = "intersections.png";
pub const CELLS_DIR: &str = "cells";
pub const CELLS_JSON: &str = "cells.json";
pub const REPORT_JSON: &str = "report.json";

/// Stateless page segmenter; share it freely across threads.
#[derive(Clone, Debug)]
pub struct GridSegmenter {
    params: SegmentationParams,
}

/// In-memory result of segmenting one page.
#[derive(Clone, Debug)]
pub struct Segmentation {
    input: Option<PathBuf>,
    source_size: (usize, usize),
    skew: SkewEstimate,
    vote: LineVote,
    deskewed: RasterImage,
    detection: GridDetection,
    cells: CellCollection,
    timings: TimingBreakdown,
}

/// One page of a batch: where to read it and where its artifacts go.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchJob {
    pub input: PathBuf,
    pub output_dir: PathBuf,
}

/// Result of one batch job; failures stay local to their job.
#[derive(Debug)]
pub struct BatchOutcome {
    pub job: BatchJob,
    pub result: Result<SegmentationReport>,
}

impl GridSegmenter {
    /// Create a segmenter after checking `params` against their ranges.
    pub fn new(params: SegmentationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SegmentationParams {
        &self.params
    }

    /// Segment an already decoded grayscale page.
    pub fn segment(&self, gray: &RasterImage) -> Result<Segmentation> {
        self.segment_timed(gray, TimingBreakdown::default(), None)
    }

    /// Load `path` as grayscale and segment it.
    pub fn segment_file(&self, path: &Path) -> Result<Segmentation> {
        let mut timings = TimingBreakdown::default();
        let gray = timings.time("load", || load_grayscale_image(path))?;
        self.segment_timed(&gray, timings, Some(path.to_path_buf()))
    }

    /// Segment `input` and write every artifact into `output_dir`.
    pub fn run(
        &self,
        input: &Path,
        output_dir: &Path,
        artifacts: &ArtifactOptions,
    ) -> Result<Segmentation> {
        artifacts.validate()?;
        let mut page = self.segment_file(input)?;
        page.write_to(output_dir, artifacts)?;
        Ok(page)
    }

    /// Run independent jobs in parallel, one output directory each.
    ///
    /// Jobs sharing an output directory are rejected before anything runs.
    /// Outcomes come back in job order.
    pub fn segment_batch(
        &self,
        jobs: &[BatchJob],
        artifacts: &ArtifactOptions,
    ) -> Result<Vec<BatchOutcome>> {
        check_distinct_outputs(jobs)?;
        artifacts.validate()?;
        let outcomes = jobs
            .par_iter()
            .map(|job| {
                let result = self
                    .run(&job.input, &job.output_dir, artifacts)
                    .map(|page| page.report());
                if let Err(err) = &result {
                    warn!("batch job {} failed: {err}", job.input.display());
                }
                BatchOutcome {
                    job: job.clone(),
                    result,
                }
            })
            .collect();
        Ok(outcomes)
    }

    fn segment_timed(
        &self,
        gray: &RasterImage,
        mut timings: TimingBreakdown,
        input: Option<PathBuf>,
    ) -> Result<Segmentation> {
        if gray.is_empty() {
            return Err(GridError::config("cannot segment an empty image"));
        }
        debug!(
            "GridSegmenter::segment start w={} h={} tol={} max_skew={} ang_thr={}",
            gray.width(),
            gray.height(),
            self.params.tol,
            self.params.max_skew,
            self.params.ang_thr
        );
        let p = &self.params;

        let binary = timings.time("binarize", || adaptive_threshold(gray, p.threshold));
        let (skew, vote) = timings.time("skew", || estimate_skew(gray, &binary, p));
        let deskewed = timings.time("rotate", || rotate(gray, skew.angle));
        let detection = timings.time("grid", || detect_grid_lines(&deskewed, p))?;
        let cells = timings.time("extract", || extract_cells(&deskewed, &detection.grid, skew))?;

        debug!(
            "GridSegmenter::segment done skew={:.3} ({}) grid={}x{} cells={} total_ms={:.3}",
            skew.angle,
            skew.method,
            detection.grid.rows(),
            detection.grid.cols(),
            cells.len(),
            timings.total_ms
        );

        Ok(Segmentation {
            input,
            source_size: (gray.width(), gray.height()),
            skew,
            vote,
            deskewed,
            detection,
            cells,
            timings,
        })
    }
}

/// Fail when two jobs would write into the same output directory.
pub fn check_distinct_outputs(jobs: &[BatchJob]) -> Result<()> {
    let mut dirs: Vec<&Path> = jobs.iter().map(|j| j.output_dir.as_path()).collect();
    dirs.sort();
    match dirs.windows(2).find(|w| w[0] == w[1]) {
        Some(pair) => Err(GridError::config(format!(
            "output_dir {} is shared by several jobs",
            pair[0].display()
        ))),
        None => Ok(()),
    }
}

impl Segmentation {
    pub fn skew(&self) -> SkewEstimate {
        self.skew
    }

    pub fn grid(&self) -> &GridLineSet {
        &self.detection.grid
    }

    pub fn detection(&self) -> &GridDetection {
        &self.detection
    }

    pub fn deskewed(&self) -> &RasterImage {
        &self.deskewed
    }

    pub fn cells(&self) -> &CellCollection {
        &self.cells
    }

    pub fn timings(&self) -> &TimingBreakdown {
        &self.timings
    }

    pub fn report(&self) -> SegmentationReport {
        let grid = &self.detection.grid;
        SegmentationReport {
            input: self.input.clone(),
            source_size: [self.source_size.0, self.source_size.1],
            deskewed_size: [self.deskewed.width(), self.deskewed.height()],
            skew: self.skew,
            skew_segments: self.vote.segments,
            skew_votes: self.vote.angles.len(),
            grid_segments: self.detection.segments.len(),
            vertical_samples: self.detection.samples.xs.len(),
            horizontal_samples: self.detection.samples.ys.len(),
            oblique_segments: self.detection.samples.discarded,
            grid: grid.clone(),
            rows: grid.rows(),
            cols: grid.cols(),
            cells: self.cells.len(),
            timings: self.timings.clone(),
        }
    }

    /// Write artifacts into `outdir` and return the `cells.json` records.
    ///
    /// `skew_debug.txt`, the cell crops and `cells.json` are always written;
    /// the preview, mask, intersections and report only with
    /// `artifacts.diagnostics`. An existing `cells/` directory is emptied
    /// first so crops of an earlier run cannot mix with this one.
    pub fn write_to(&mut self, outdir: &Path, artifacts: &ArtifactOptions) -> Result<Vec<CellRecord>> {
        artifacts.validate()?;
        let cells_dir = outdir.join(CELLS_DIR);
        if cells_dir.is_dir() {
            debug!("clearing previous crops in {}", cells_dir.display());
            fs::remove_dir_all(&cells_dir).map_err(|e| GridError::io(&cells_dir, e))?;
        }
        fs::create_dir_all(&cells_dir).map_err(|e| GridError::io(&cells_dir, e))?;

        let (w, h) = (self.deskewed.width(), self.deskewed.height());
        if artifacts.diagnostics {
            save_raster(&self.deskewed, &outdir.join(DESKEWED_PREVIEW))?;
        }
        write_text_file(&outdir.join(SKEW_DEBUG), &self.skew.debug_text())?;
        if artifacts.diagnostics {
            let grid = &self.detection.grid;
            save_raster(&render_grid_mask(w, h, grid), &outdir.join(GRID_MASK))?;
            save_raster(&render_intersections(w, h, grid), &outdir.join(INTERSECTIONS))?;
        }

        let records = self.cells.persist(&cells_dir, &artifacts.cell_format)?;
        write_json_file(&outdir.join(CELLS_JSON), &records)?;
        if artifacts.diagnostics {
            write_json_file(&outdir.join(REPORT_JSON), &self.report())?;
        }
        info!(
            "wrote {} cells to {} (skew {:.3} via {})",
            records.len(),
            cells_dir.display(),
            self.skew.angle,
            self.skew.method
        );
        Ok(records)
    }
}
