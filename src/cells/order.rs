//! Reading-order sequencing.
//!
//! Manuscript sheets are read in vertical columns from right to left, each
//! column top to bottom, so the order is descending column then ascending
//! row. Items without a usable identity are dropped with a warning.

use super::{Cell, CellRecord};
use crate::error::{GridError, Result};
use crate::types::CellId;
use log::warn;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Anything carrying a structured cell identity.
pub trait HasCellId {
    fn cell_id(&self) -> CellId;
}

impl HasCellId for CellId {
    fn cell_id(&self) -> CellId {
        *self
    }
}

impl HasCellId for Cell {
    fn cell_id(&self) -> CellId {
        self.id
    }
}

impl HasCellId for CellRecord {
    fn cell_id(&self) -> CellId {
        self.id()
    }
}

impl<T: HasCellId + ?Sized> HasCellId for &T {
    fn cell_id(&self) -> CellId {
        (**self).cell_id()
    }
}

/// Order items by descending column, then ascending row.
pub fn reading_order<T: HasCellId>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut kept: Vec<T> = items
        .into_iter()
        .filter(|item| {
            let id = item.cell_id();
            if !id.is_valid() {
                warn!("skipping cell with unusable identity {id}");
            }
            id.is_valid()
        })
        .collect();
    kept.sort_by_key(|item| {
        let id = item.cell_id();
        (Reverse(id.col), id.row)
    });
    kept
}

/// Collect `r<NN>_c<NN>.<ext>` files under `dir` (recursively) in reading
/// order.
///
/// For consuming cell directories written by earlier runs; files whose name
/// does not encode an identity are skipped with a warning.
pub fn sequence_cell_files(dir: &Path, ext: &str) -> Result<Vec<(CellId, PathBuf)>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            GridError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if !matches_ext {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        match CellId::parse_file_name(&name) {
            Some(id) => found.push((id, path.to_path_buf())),
            None => warn!("file name does not match r<NN>_c<NN>: {}", path.display()),
        }
    }
    Ok(reading_order(found))
}

impl HasCellId for (CellId, PathBuf) {
    fn cell_id(&self) -> CellId {
        self.0
    }
}
