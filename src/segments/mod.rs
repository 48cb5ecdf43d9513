//! Probabilistic Hough line-segment detection.
//!
//! Edge pixels vote into a (theta, rho) accumulator one at a time in a
//! shuffled order. As soon as a bin reaches the vote threshold, the line
//! through the current pixel at that angle is walked in both directions over
//! the edge map, tolerating gaps up to `max_gap`. The walk tracks the edge up
//! to one pixel sideways per step, so slightly tilted rules are followed
//! along their staircase rather than cut where they leave the voted angle.
//! Walked pixels are removed from the edge map (and, for accepted segments,
//! their votes are withdrawn), so each physical line is reported a small
//! number of times instead of once per pixel.
//!
//! Rho resolution is 1 px; theta resolution is `HoughParams::theta_step_deg`.
//! The pixel order is shuffled with a fixed seed so repeated runs on the same
//! image return the same segments.

mod hough;
mod options;
mod segment;

pub use hough::hough_segments;
pub use options::HoughParams;
pub use segment::LineSegment;
