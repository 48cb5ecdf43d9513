//! Separable smoothing filters with replicated borders.
//!
//! Both the Gaussian pre-blur used by binarization and the local-mean window
//! of the adaptive threshold are separable, so they share one horizontal pass
//! and one vertical pass over a float buffer.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). Odd length, centred.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Uniform averaging window of `size` taps.
#[derive(Clone, Debug)]
pub struct BoxFilter {
    taps: Vec<f32>,
}

impl BoxFilter {
    /// `size` is forced odd so the window stays centred.
    pub fn new(size: usize) -> Self {
        let size = size.max(1) | 1;
        Self {
            taps: vec![1.0 / size as f32; size],
        }
    }
}

impl SeparableFilter for BoxFilter {
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve rows then columns with `filter`, replicating edge pixels.
pub fn filter_separable<F: SeparableFilter + ?Sized>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    let radius = taps.len() / 2;
    let (w, h) = (src.w, src.h);
    let mut horiz = ImageF32::new(w, h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 || taps.is_empty() {
        return out;
    }

    for y in 0..h {
        let row = src.row(y);
        let dst = horiz.row_mut(y);
        for (x, dst_px) in dst.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &tap) in taps.iter().enumerate() {
                let sx = clamp_index(x as isize + k as isize - radius as isize, w);
                acc += tap * row[sx];
            }
            *dst_px = acc;
        }
    }

    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &tap) in taps.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius as isize, h);
            let src_row = horiz.row(sy);
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d += tap * s;
            }
        }
    }
    out
}

/// 5×5 Gaussian blur.
pub fn gaussian_blur(src: &ImageF32) -> ImageF32 {
    filter_separable(src, &GAUSSIAN_5TAP)
}

/// Mean over a `size × size` window centred on each pixel.
pub fn box_mean(src: &ImageF32, size: usize) -> ImageF32 {
    filter_separable(src, &BoxFilter::new(size))
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if idx < 0 {
        0
    } else if (idx as usize) >= upper {
        upper - 1
    } else {
        idx as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_image_is_a_fixed_point() {
        let mut img = ImageF32::new(9, 7);
        img.data.iter_mut().for_each(|v| *v = 42.0);
        for out in [gaussian_blur(&img), box_mean(&img, 5)] {
            assert!(out.data.iter().all(|v| (v - 42.0).abs() < 1e-3));
        }
    }

    #[test]
    fn box_mean_averages_window() {
        let mut img = ImageF32::new(5, 5);
        img.set(2, 2, 9.0);
        let out = box_mean(&img, 3);
        assert!((out.get(2, 2) - 1.0).abs() < 1e-5);
        assert!((out.get(1, 1) - 1.0).abs() < 1e-5);
        assert!(out.get(0, 0).abs() < 1e-5);
    }

    #[test]
    fn even_box_size_is_made_odd() {
        assert_eq!(BoxFilter::new(4).taps().len(), 5);
        assert_eq!(BoxFilter::new(0).taps().len(), 1);
    }
}
