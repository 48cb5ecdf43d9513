//! Rotation about the image centre with an affine inverse map.
//!
//! `rotate(img, a)` makes features oriented at `a` degrees (image coordinates,
//! y down) axis-aligned. Output pixels are pulled from the source through the
//! inverse transform; samples falling outside the source read as white.
use crate::image::gray::WHITE;
use crate::image::RasterImage;
use nalgebra::{Matrix3, Vector3};

/// Angles smaller than this (degrees) leave the image untouched.
pub const MIN_ROTATION_DEG: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Canvas {
    /// Grow to the rotated bounding box so nothing is clipped.
    Expand,
    /// Keep the source dimensions (corners are clipped).
    Keep,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Nearest,
    Bilinear,
}

/// Deskewing rotation: expanded canvas, bilinear sampling, no-op for
/// `|angle| < 0.01°`.
pub fn rotate(image: &RasterImage, angle_deg: f32) -> RasterImage {
    if angle_deg.abs() < MIN_ROTATION_DEG {
        return image.clone();
    }
    rotate_with(image, angle_deg, Canvas::Expand, Interpolation::Bilinear)
}

/// Output size for a rotation by `angle_deg` on an expanded canvas.
pub fn expanded_size(width: usize, height: usize, angle_deg: f32) -> (usize, usize) {
    let t = (angle_deg as f64).to_radians();
    let (cos, sin) = (t.cos().abs(), t.sin().abs());
    let (w, h) = (width as f64, height as f64);
    // Guard against 0.9999999 style truncation on exact multiples of 90°.
    let nw = (h * sin + w * cos + 1e-9).floor() as usize;
    let nh = (h * cos + w * sin + 1e-9).floor() as usize;
    (nw, nh)
}

/// Output → source affine map (homogeneous 2D).
fn inverse_map(src: (usize, usize), dst: (usize, usize), angle_deg: f32) -> Matrix3<f64> {
    let t = (angle_deg as f64).to_radians();
    let (cos, sin) = (t.cos(), t.sin());
    let to_origin = Matrix3::new(
        1.0,
        0.0,
        -(dst.0 as f64) / 2.0,
        0.0,
        1.0,
        -(dst.1 as f64) / 2.0,
        0.0,
        0.0,
        1.0,
    );
    let rot = Matrix3::new(cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0);
    let to_source = Matrix3::new(
        1.0,
        0.0,
        src.0 as f64 / 2.0,
        0.0,
        1.0,
        src.1 as f64 / 2.0,
        0.0,
        0.0,
        1.0,
    );
    to_source * rot * to_origin
}

/// Rotation with explicit canvas and sampling policy. Never a no-op.
pub fn rotate_with(
    image: &RasterImage,
    angle_deg: f32,
    canvas: Canvas,
    interpolation: Interpolation,
) -> RasterImage {
    let (w, h) = (image.width(), image.height());
    let (nw, nh) = match canvas {
        Canvas::Expand => expanded_size(w, h, angle_deg),
        Canvas::Keep => (w, h),
    };
    let m = inverse_map((w, h), (nw, nh), angle_deg);

    RasterImage::from_fn(nw, nh, |x, y| {
        let p = m * Vector3::new(x as f64, y as f64, 1.0);
        match interpolation {
            Interpolation::Nearest => {
                image.get_or(p.x.round() as i64, p.y.round() as i64, WHITE)
            }
            Interpolation::Bilinear => sample_bilinear(image, p.x, p.y),
        }
    })
}

fn sample_bilinear(image: &RasterImage, sx: f64, sy: f64) -> u8 {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);
    let p00 = image.get_or(x0, y0, WHITE) as f64;
    let p10 = image.get_or(x0 + 1, y0, WHITE) as f64;
    let p01 = image.get_or(x0, y0 + 1, WHITE) as f64;
    let p11 = image.get_or(x0 + 1, y0 + 1, WHITE) as f64;
    let top = p00 + (p10 - p00) * fx;
    let bottom = p01 + (p11 - p01) * fx;
    (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8
}
