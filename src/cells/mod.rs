//! Cells cut from the canonical grid, their metadata, and reading order.
//!
//! Cells are produced row-major (ascending row, then column) by
//! [`extract_cells`]; [`reading_order`] derives the manuscript order
//! (columns right to left, each read top to bottom) without touching the
//! detection order.

mod extract;
pub mod order;

pub use extract::extract_cells;
pub use order::{reading_order, sequence_cell_files, HasCellId};

use crate::error::Result;
use crate::image::io::save_raster;
use crate::image::RasterImage;
use crate::types::{CellBox, CellId, DeskewMethod, SkewEstimate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One grid cell with its crop and provenance.
#[derive(Clone, Debug)]
pub struct Cell {
    pub id: CellId,
    pub bbox: CellBox,
    pub image: RasterImage,
    pub skew: SkewEstimate,
    /// Set once the crop has been written to disk.
    pub file: Option<PathBuf>,
}

impl Cell {
    pub fn record(&self) -> CellRecord {
        CellRecord {
            row: self.id.row,
            col: self.id.col,
            x: self.bbox.x,
            y: self.bbox.y,
            w: self.bbox.w,
            h: self.bbox.h,
            deskew_angle: self.skew.angle,
            deskew_method: self.skew.method,
            file: self.file.clone(),
        }
    }
}

/// Serialized metadata entry of `cells.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: u32,
    pub col: u32,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub deskew_angle: f32,
    pub deskew_method: DeskewMethod,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl CellRecord {
    pub fn id(&self) -> CellId {
        CellId::new(self.row, self.col)
    }

    pub fn bbox(&self) -> CellBox {
        CellBox {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        }
    }
}

/// All cells of one page in detection (row-major) order.
#[derive(Clone, Debug, Default)]
pub struct CellCollection {
    cells: Vec<Cell>,
}

impl CellCollection {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Manuscript reading order; see [`reading_order`].
    pub fn reading_order(&self) -> Vec<&Cell> {
        reading_order(self.cells.iter())
    }

    pub fn records(&self) -> Vec<CellRecord> {
        self.cells.iter().map(Cell::record).collect()
    }

    /// Write every crop as `dir/r<RR>_c<CC>.<ext>` and remember the paths.
    pub fn persist(&mut self, dir: &Path, ext: &str) -> Result<Vec<CellRecord>> {
        for cell in &mut self.cells {
            let path = dir.join(format!("{}.{ext}", cell.id.file_stem()));
            save_raster(&cell.image, &path)?;
            cell.file = Some(path);
        }
        Ok(self.records())
    }
}

impl<'a> IntoIterator for &'a CellCollection {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
