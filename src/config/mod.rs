//! Configuration loaded by the command-line tools.
//!
//! - [`ArtifactOptions`]: which side outputs a run writes and in which format.
//! - [`run`]: the JSON files consumed by `segment_grid` and `segment_batch`.

pub mod run;

pub use run::{load_batch_config, load_config, BatchConfig, RunConfig};

use crate::error::{GridError, Result};
use image::ImageFormat;
use serde::{Deserialize, Serialize};

/// Encoders that accept 8-bit grayscale with the default `image` features.
const CELL_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Pnm,
    ImageFormat::Tga,
];

/// Output options for [`crate::detector::Segmentation::write_to`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactOptions {
    /// Write `deskewed_preview.png`, `grid_mask.png`, `intersections.png`
    /// and `report.json`.
    pub diagnostics: bool,
    /// File extension (and encoder) for cell crops.
    pub cell_format: String,
}

impl Default for ArtifactOptions {
    fn default() -> Self {
        Self {
            diagnostics: true,
            cell_format: "png".to_string(),
        }
    }
}

impl ArtifactOptions {
    pub fn without_diagnostics(mut self) -> Self {
        self.diagnostics = false;
        self
    }

    pub fn with_cell_format(mut self, ext: impl Into<String>) -> Self {
        self.cell_format = ext.into();
        self
    }

    /// Reject extensions without a grayscale encoder.
    pub fn validate(&self) -> Result<()> {
        match ImageFormat::from_extension(&self.cell_format) {
            Some(format) if CELL_FORMATS.contains(&format) => Ok(()),
            _ => Err(GridError::config(format!(
                "cell_format {:?} is not one of png, jpg, bmp, tif, pgm, tga",
                self.cell_format
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_writes_png_with_diagnostics() {
        let opts = ArtifactOptions::default();
        assert!(opts.diagnostics);
        assert_eq!(opts.cell_format, "png");
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn unknown_formats_are_rejected() {
        assert!(ArtifactOptions::default()
            .with_cell_format("docx")
            .validate()
            .is_err());
        assert!(ArtifactOptions::default()
            .with_cell_format("bmp")
            .validate()
            .is_ok());
    }
}
