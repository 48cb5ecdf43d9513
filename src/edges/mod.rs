//! Edge detection: Sobel gradients, direction-aligned non-maximum suppression
//! and hysteresis linking (Canny).
//!
//! Both the skew estimator and the grid-line detector vote only over the
//! binary [`EdgeMap`] produced here.
//!
//! - Gradients use 3×3 Sobel kernels with replicated borders on 0..=255
//!   intensities, so thresholds are in the usual 8-bit Canny units.
//! - NMS keeps pixels that are maximal along the quantized gradient direction;
//!   plateaus are broken by a strict/non-strict neighbour pair so two-pixel
//!   wide ridges keep one edge.
//! - Hysteresis grows strong edges through 8-connected weak candidates.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{canny, CannyParams, EdgeMap};
pub use grad::{sobel_gradients, Grad};
pub use nms::{non_max_suppression, EdgeClass};
