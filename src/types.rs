use serde::{Deserialize, Serialize};
use std::fmt;

/// Which estimator produced the deskew angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeskewMethod {
    /// Median of line-segment angles.
    Hough,
    /// Projection-profile variance search.
    Projection,
}

impl DeskewMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            DeskewMethod::Hough => "hough",
            DeskewMethod::Projection => "projection",
        }
    }
}

impl fmt::Display for DeskewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Corrective rotation in degrees plus the method that found it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkewEstimate {
    pub angle: f32,
    pub method: DeskewMethod,
}

impl SkewEstimate {
    /// Contents of `skew_debug.txt`.
    pub fn debug_text(&self) -> String {
        format!("angle={:.3}\nmethod={}\n", self.angle, self.method)
    }
}

/// Canonical grid-line coordinates on the deskewed image.
///
/// `xs` are vertical lines, `ys` horizontal lines; both strictly ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLineSet {
    pub xs: Vec<i32>,
    pub ys: Vec<i32>,
}

impl GridLineSet {
    pub fn rows(&self) -> usize {
        self.ys.len().saturating_sub(1)
    }

    pub fn cols(&self) -> usize {
        self.xs.len().saturating_sub(1)
    }

    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    /// All `(x, y)` line intersections, row-major.
    pub fn intersections(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.ys
            .iter()
            .flat_map(move |&y| self.xs.iter().map(move |&x| (x, y)))
    }
}

/// Structured 1-based cell identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub row: u32,
    pub col: u32,
}

impl CellId {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Both indices are 1-based; zero means the identity is unknown.
    pub fn is_valid(&self) -> bool {
        self.row >= 1 && self.col >= 1
    }

    /// `r<RR>_c<CC>` stem used for cell file names.
    pub fn file_stem(&self) -> String {
        format!("r{:02}_c{:02}", self.row, self.col)
    }

    /// Parse an `r<NN>_c<NN>.<ext>` file name (case-insensitive).
    pub fn parse_file_name(name: &str) -> Option<CellId> {
        let lower = name.to_ascii_lowercase();
        let (stem, _ext) = lower.rsplit_once('.')?;
        let (row_part, col_part) = stem.split_once('_')?;
        let row = row_part.strip_prefix('r')?;
        let col = col_part.strip_prefix('c')?;
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(row) || !all_digits(col) {
            return None;
        }
        let id = CellId::new(row.parse().ok()?, col.parse().ok()?);
        id.is_valid().then_some(id)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Axis-aligned pixel rectangle `[x, x+w) × [y, y+h)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}
