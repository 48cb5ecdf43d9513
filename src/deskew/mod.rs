//! Skew estimation and correction.
//!
//! The estimator first tries line-angle voting: long Hough segments on the
//! Canny edge map each vote with their angle, and the median wins when enough
//! plausible votes exist and they are not suspiciously uniform. Otherwise a
//! projection-profile search rotates the binarized page through every
//! integer degree in `[-max_skew, max_skew]` and keeps the angle whose row
//! histogram of dark pixels has the largest variance (sharpest banding).
//!
//! Angles are in degrees and describe the orientation of the printed
//! horizontal rules; [`rotate`] with the same angle levels them.

mod estimator;
mod projection;
pub mod rotate;

pub use estimator::{estimate_skew, line_vote_skew, LineVote};
pub use projection::{projection_profile_skew, ProjectionScan};
pub use rotate::{rotate, rotate_with, Canvas, Interpolation};
