//! Boundary to a per-cell character classifier.
//!
//! The crate does not ship a model. Callers implement [`CellClassifier`] on
//! top of whatever inference runtime they use and hand it to
//! [`recognize_sheet`], which segments the page, persists it into a scoped
//! temporary workspace, and concatenates the best prediction of each
//! non-blank cell in reading order.
//!
//! Class labels come from a `class_to_idx.json` mapping (`{label: index}`).
//! Labels of the form `U+XXXX` name a Unicode scalar; anything else is used
//! verbatim.
use crate::config::ArtifactOptions;
use crate::detector::{GridSegmenter, RunWorkspace};
use crate::error::{GridError, Result};
use crate::image::io::decode_grayscale;
use crate::image::{ImageF32, ImageView, RasterImage};
use crate::types::SkewEstimate;
use image::imageops::{self, FilterType};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Label the classifier emits for an empty cell.
pub const BLANK_LABEL: &str = "空白格";
/// Side of the square classifier input.
pub const INPUT_SIZE: u32 = 96;
/// Pixels at or above this become white before resizing.
pub const BINARIZE_THRESHOLD: u8 = 128;

const NORM_MEAN: f32 = 0.5;
const NORM_STD: f32 = 0.5;

/// One scored class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub probability: f32,
}

/// A character classifier for single cell crops.
pub trait CellClassifier: Sync {
    /// Scores for `cell`, best first. Implementations usually start from
    /// [`prepare_classifier_input`].
    fn classify(&self, cell: &RasterImage) -> Result<Vec<Prediction>>;
}

/// Inverted `class_to_idx` mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassIndex {
    labels: BTreeMap<usize, String>,
}

impl ClassIndex {
    pub fn from_json(json: &str) -> Result<Self> {
        let mapping: HashMap<String, usize> = serde_json::from_str(json)?;
        let mut labels = BTreeMap::new();
        for (label, index) in mapping {
            if let Some(prev) = labels.insert(index, label) {
                return Err(GridError::config(format!(
                    "class index {index} assigned to more than one label (one is {prev:?})"
                )));
            }
        }
        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| GridError::io(path, e))?;
        Self::from_json(&data)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Raw label as stored in the mapping.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(&index).map(String::as_str)
    }

    /// Decoded text for `index`.
    pub fn text(&self, index: usize) -> Option<String> {
        self.label(index).map(decode_label)
    }
}

/// `U+4E00` → `一`; other labels pass through unchanged.
pub fn decode_label(label: &str) -> String {
    let Some(hex) = label.strip_prefix("U+") else {
        return label.to_string();
    };
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(ch) => ch.to_string(),
        None => {
            warn!("label {label:?} is not a valid code point, using it verbatim");
            label.to_string()
        }
    }
}

/// Fixed threshold at 128, bilinear resize to 96×96, then normalise to
/// `(v / 255 - 0.5) / 0.5`, i.e. paper at `1.0` and ink at `-1.0`.
pub fn prepare_classifier_input(cell: &RasterImage) -> Result<ImageF32> {
    if cell.is_empty() {
        return Err(GridError::config("cannot classify an empty cell"));
    }
    let binary = cell.map(|v| if v >= BINARIZE_THRESHOLD { 255 } else { 0 });
    let resized = imageops::resize(
        &binary.to_gray_image(),
        INPUT_SIZE,
        INPUT_SIZE,
        FilterType::Triangle,
    );
    let side = INPUT_SIZE as usize;
    let mut out = ImageF32::new(side, side);
    for (x, y, px) in resized.enumerate_pixels() {
        let v = px.0[0] as f32 / 255.0;
        out.set(x as usize, y as usize, (v - NORM_MEAN) / NORM_STD);
    }
    Ok(out)
}

/// Classify `cells` (already in reading order) and join the top predictions,
/// leaving out blanks.
pub fn assemble_text<'a>(
    cells: impl IntoIterator<Item = &'a RasterImage>,
    classifier: &dyn CellClassifier,
    index: &ClassIndex,
) -> Result<String> {
    let mut text = String::new();
    for (i, cell) in cells.into_iter().enumerate() {
        let predictions = classifier.classify(cell)?;
        let Some(best) = predictions.first() else {
            return Err(GridError::Classifier(
                format!("no prediction for cell #{i}").into(),
            ));
        };
        let Some(label) = index.text(best.index) else {
            return Err(GridError::Classifier(
                format!("class {} missing from the class index", best.index).into(),
            ));
        };
        if label != BLANK_LABEL {
            text.push_str(&label);
        }
    }
    Ok(text)
}

/// Text and provenance of one recognised sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedSheet {
    pub text: String,
    pub cells: usize,
    pub skew: SkewEstimate,
}

/// Segment `gray`, persist the run into a temporary workspace, and classify
/// its cells in reading order.
///
/// Cells are classified from the in-memory crops using their structured
/// identities. The workspace is removed on return, whether recognition
/// succeeded or not.
pub fn recognize_sheet(
    gray: &RasterImage,
    segmenter: &GridSegmenter,
    classifier: &dyn CellClassifier,
    index: &ClassIndex,
) -> Result<RecognizedSheet> {
    let workspace = RunWorkspace::new()?;
    let artifacts = ArtifactOptions::default().without_diagnostics();

    let mut page = segmenter.segment(gray)?;
    page.write_to(workspace.path(), &artifacts)?;

    let ordered = page.cells().reading_order();
    debug!("classifying {} cells", ordered.len());
    let text = assemble_text(ordered.iter().map(|cell| &cell.image), classifier, index)?;

    Ok(RecognizedSheet {
        text,
        cells: ordered.len(),
        skew: page.skew(),
    })
}

/// [`recognize_sheet`] for an encoded upload body.
pub fn recognize_upload(
    bytes: &[u8],
    segmenter: &GridSegmenter,
    classifier: &dyn CellClassifier,
    index: &ClassIndex,
) -> Result<RecognizedSheet> {
    let gray = decode_grayscale(bytes)?;
    recognize_sheet(&gray, segmenter, classifier, index)
}
