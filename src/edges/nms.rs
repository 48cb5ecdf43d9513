//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! For each pixel the gradient direction is quantized into four bins
//! (0°, 45°, 90°, 135°) to pick two comparison neighbours. A pixel survives
//! when it beats the first neighbour strictly and the second one non-strictly,
//! which keeps exactly one pixel on flat two-pixel ridges.
//!
//! The outermost 1-pixel frame is never an edge.
use super::grad::Grad;
use crate::image::ImageView;

const TAN_22_5_DEG: f32 = 0.41421356237;

/// Classification of a pixel after suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeClass {
    None,
    /// Above the low threshold; kept only if linked to a strong pixel.
    Weak,
    /// Above the high threshold.
    Strong,
}

/// Suppress non-maximal responses and classify survivors against the
/// hysteresis thresholds.
pub fn non_max_suppression(grad: &Grad, low: f32, high: f32) -> Vec<EdgeClass> {
    let w = grad.gx.w;
    let h = grad.gx.h;
    let mut out = vec![EdgeClass::None; w * h];
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            let (before, after) = if abs_gy <= abs_gx * TAN_22_5_DEG {
                (mag_row[x - 1], mag_row[x + 1])
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x - 1], mag_next[x + 1])
            } else {
                (mag_prev[x + 1], mag_next[x - 1])
            };

            if mag > before && mag >= after {
                out[y * w + x] = if mag > high {
                    EdgeClass::Strong
                } else {
                    EdgeClass::Weak
                };
            }
        }
    }

    out
}
