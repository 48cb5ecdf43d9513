//! Owned 8-bit grayscale raster.
use super::ImageView;
use crate::error::{GridError, Result};
use image::GrayImage;

/// Background value used for fills and canvas borders.
pub const WHITE: u8 = 255;

/// Immutable 8-bit grayscale image (row-major, stride == width).
///
/// There is no in-place mutation API; crops, rotations and thresholds all
/// allocate a new raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap raw row-major bytes, checking the buffer length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(GridError::config(format!(
                "raster buffer holds {} bytes, expected {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Uniform image.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Sample with out-of-range coordinates mapped to `fill`.
    #[inline]
    pub fn get_or(&self, x: i64, y: i64, fill: u8) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            fill
        } else {
            self.get(x as usize, y as usize)
        }
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Copy the half-open rectangle `[x, x+w) × [y, y+h)`.
    pub fn crop(&self, x: usize, y: usize, w: usize, h: usize) -> Result<RasterImage> {
        if x + w > self.width || y + h > self.height {
            return Err(GridError::config(format!(
                "crop ({x}, {y}, {w}, {h}) exceeds {}x{} image",
                self.width, self.height
            )));
        }
        let mut data = Vec::with_capacity(w * h);
        for row in self.data.chunks_exact(self.width.max(1)).skip(y).take(h) {
            data.extend_from_slice(&row[x..x + w]);
        }
        Ok(RasterImage {
            width: w,
            height: h,
            data,
        })
    }

    /// Per-pixel mapping into a new image.
    pub fn map(&self, f: impl Fn(u8) -> u8) -> RasterImage {
        RasterImage {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn to_gray_image(&self) -> GrayImage {
        // Dimensions and length are consistent by construction.
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            image::Luma([self.get(x as usize, y as usize)])
        })
    }

    pub fn from_gray_image(img: GrayImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

impl ImageView for RasterImage {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}
