//! Adaptive mean thresholding.
//!
//! The projection-profile skew fallback works on a binary image where printed
//! rules and handwriting are dark (0) and paper is white (255). The threshold
//! is local so uneven lighting in photographed sheets does not flood whole
//! regions.
use crate::filters::{box_mean, gaussian_blur};
use crate::image::{ImageF32, ImageView, RasterImage};
use serde::{Deserialize, Serialize};

/// Parameters for [`adaptive_threshold`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdParams {
    /// Side of the square window the local mean is taken over (odd).
    pub block_size: usize,
    /// A pixel is ink when it is at least this much darker than the local mean.
    pub offset: f32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            block_size: 19,
            offset: 8.0,
        }
    }
}

/// Gaussian pre-blur followed by a local-mean threshold.
pub fn adaptive_threshold(gray: &RasterImage, params: ThresholdParams) -> RasterImage {
    let blurred = gaussian_blur(&ImageF32::from_raster(gray));
    let mean = box_mean(&blurred, params.block_size);
    RasterImage::from_fn(gray.width(), gray.height(), |x, y| {
        if blurred.get(x, y) > mean.get(x, y) - params.offset {
            255
        } else {
            0
        }
    })
}

/// Number of dark (zero) pixels on each row.
pub fn dark_row_counts(binary: &RasterImage) -> Vec<usize> {
    binary
        .rows()
        .map(|row| row.iter().filter(|&&v| v == 0).count())
        .collect()
}
