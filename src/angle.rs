//! Angle and small-sample statistics helpers shared by the skew estimator and
//! the grid-line classifier.

/// Orientation of the segment `(x1, y1) → (x2, y2)` in degrees, folded into
/// `(-90, 90]`. Image coordinates: y grows downward, so a segment falling to
/// the right has a positive angle.
#[inline]
pub fn segment_angle_deg(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    fold_half_turn_deg((y2 - y1).atan2(x2 - x1).to_degrees())
}

/// Folds any angle in degrees into `(-90, 90]`; directions 180° apart are
/// the same line.
#[inline]
pub fn fold_half_turn_deg(angle: f32) -> f32 {
    let mut a = angle.rem_euclid(180.0);
    if a > 90.0 {
        a -= 180.0;
    }
    if a <= -90.0 {
        a += 180.0;
    }
    a
}

/// Median of `values` (mean of the middle pair for even lengths).
pub fn median(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let m = sorted.len();
    Some(if m % 2 == 1 {
        sorted[m / 2]
    } else {
        0.5 * (sorted[m / 2 - 1] + sorted[m / 2])
    })
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

/// Population standard deviation of angles in degrees.
pub fn std_dev(values: &[f32]) -> f32 {
    let wide: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    variance(&wide).sqrt() as f32
}
