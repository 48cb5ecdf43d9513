use super::rotate::{rotate_with, Canvas, Interpolation};
use crate::angle::variance;
use crate::binarize::dark_row_counts;
use crate::image::RasterImage;
use log::debug;

/// Result of the projection-profile search.
#[derive(Clone, Debug)]
pub struct ProjectionScan {
    /// Best angle in degrees.
    pub angle: f32,
    /// `(angle, variance)` for every candidate, ascending by angle.
    pub candidates: Vec<(f32, f64)>,
}

/// Search integer angles in `[-floor(max_skew), floor(max_skew)]` for the
/// rotation that maximises the variance of per-row dark-pixel counts.
///
/// Ties keep the first maximum in ascending order.
pub fn projection_profile_skew(binary: &RasterImage, max_skew: f32) -> ProjectionScan {
    let limit = max_skew.max(0.0).floor() as i32;
    let mut candidates = Vec::with_capacity((2 * limit + 1) as usize);
    let mut best = (0.0f32, f64::NEG_INFINITY);

    for deg in -limit..=limit {
        let rotated = rotate_with(binary, deg as f32, Canvas::Keep, Interpolation::Nearest);
        let profile: Vec<f64> = dark_row_counts(&rotated)
            .into_iter()
            .map(|c| c as f64)
            .collect();
        let var = variance(&profile);
        candidates.push((deg as f32, var));
        if var > best.1 {
            best = (deg as f32, var);
        }
    }

    debug!(
        "projection skew: best={:.1} variance={:.2} over {} candidates",
        best.0,
        best.1,
        candidates.len()
    );
    ProjectionScan {
        angle: best.0,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(width: usize, height: usize, angle_deg: f32) -> RasterImage {
        let slope = angle_deg.to_radians().tan();
        let cx = width as f32 / 2.0;
        RasterImage::from_fn(width, height, |x, y| {
            let offset = y as f32 - (x as f32 - cx) * slope;
            if offset.rem_euclid(25.0) < 2.0 {
                0
            } else {
                255
            }
        })
    }

    #[test]
    fn finds_tilt_of_striped_page() {
        for angle in [-7.0f32, 0.0, 4.0] {
            let scan = projection_profile_skew(&striped(240, 240, angle), 10.0);
            assert!(
                (scan.angle - angle).abs() <= 1.0,
                "expected ~{angle}, got {}",
                scan.angle
            );
            assert_eq!(scan.candidates.len(), 21);
        }
    }

    #[test]
    fn blank_page_ties_resolve_to_first_candidate() {
        let blank = RasterImage::filled(50, 50, 255);
        let scan = projection_profile_skew(&blank, 3.0);
        assert_eq!(scan.angle, -3.0);
        assert!(scan.candidates.iter().all(|&(_, v)| v == 0.0));
    }

    #[test]
    fn fractional_limit_is_floored() {
        let blank = RasterImage::filled(10, 10, 255);
        assert_eq!(projection_profile_skew(&blank, 2.7).candidates.len(), 5);
        assert_eq!(projection_profile_skew(&blank, 0.0).candidates.len(), 1);
    }
}
