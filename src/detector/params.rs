//! Parameter types configuring the segmentation stages.
//!
//! The three knobs a caller normally touches are `tol`, `max_skew` and
//! `ang_thr`; the remaining groups fix the edge, Hough and threshold settings
//! of the individual stages and rarely need tuning.

use crate::binarize::ThresholdParams;
use crate::edges::CannyParams;
use crate::error::{GridError, Result};
use crate::segments::HoughParams;
use serde::{Deserialize, Serialize};

/// Largest accepted clustering tolerance in pixels.
pub const MAX_TOL: u32 = 200;
/// Largest accepted skew search range in degrees.
pub const MAX_SKEW_LIMIT: f32 = 45.0;

/// Segmentation parameters with documented ranges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Pixel distance under which raw line coordinates merge, `1..=200`.
    pub tol: u32,
    /// Largest skew (degrees) the estimator searches, `0..=45`.
    pub max_skew: f32,
    /// Degrees from axis-aligned still classified as horizontal/vertical, `0..45`.
    pub ang_thr: f32,
    /// Canny thresholds shared by both Hough passes.
    pub canny: CannyParams,
    /// Hough settings for skew estimation.
    pub skew_hough: HoughParams,
    /// Hough settings for grid-line detection.
    pub grid_hough: HoughParams,
    /// Grid detection fails with fewer segments than this.
    pub min_segments: usize,
    /// Line voting needs at least this many admissible angles.
    pub min_skew_votes: usize,
    /// Line voting is trusted only when the angle spread reaches this (degrees).
    pub min_angle_spread_deg: f32,
    /// Skew votes steeper than this (degrees) are ignored.
    pub near_vertical_deg: f32,
    /// Adaptive threshold feeding the projection fallback.
    pub threshold: ThresholdParams,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            tol: 10,
            max_skew: 20.0,
            ang_thr: 5.0,
            canny: CannyParams::default(),
            skew_hough: HoughParams::skew(),
            grid_hough: HoughParams::grid(),
            min_segments: 10,
            min_skew_votes: 10,
            min_angle_spread_deg: 0.3,
            near_vertical_deg: 85.0,
            threshold: ThresholdParams::default(),
        }
    }
}

impl SegmentationParams {
    pub fn with_tol(mut self, tol: u32) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_skew(mut self, max_skew: f32) -> Self {
        self.max_skew = max_skew;
        self
    }

    pub fn with_ang_thr(mut self, ang_thr: f32) -> Self {
        self.ang_thr = ang_thr;
        self
    }

    /// Looser variant for a caller-side retry: doubled `tol`, `ang_thr` + 5°.
    ///
    /// The pipeline never retries on its own.
    pub fn relaxed(&self) -> Self {
        Self {
            tol: self.tol.saturating_mul(2).min(MAX_TOL),
            ang_thr: (self.ang_thr + 5.0).min(44.0),
            ..self.clone()
        }
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TOL).contains(&self.tol) {
            return Err(GridError::config(format!(
                "tol must be in 1..={MAX_TOL}, got {}",
                self.tol
            )));
        }
        if !self.max_skew.is_finite() || !(0.0..=MAX_SKEW_LIMIT).contains(&self.max_skew) {
            return Err(GridError::config(format!(
                "max_skew must be in [0, {MAX_SKEW_LIMIT}], got {}",
                self.max_skew
            )));
        }
        if !self.ang_thr.is_finite() || !(0.0..45.0).contains(&self.ang_thr) {
            return Err(GridError::config(format!(
                "ang_thr must be in [0, 45), got {}",
                self.ang_thr
            )));
        }
        if !(self.canny.low >= 0.0 && self.canny.low <= self.canny.high) {
            return Err(GridError::config(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                self.canny.low, self.canny.high
            )));
        }
        for (name, hough) in [("skew_hough", &self.skew_hough), ("grid_hough", &self.grid_hough)] {
            if !hough.is_valid() {
                return Err(GridError::config(format!(
                    "{name}: need threshold > 0, min_length_frac in (0, 1] and theta_step_deg in [0.05, 10]"
                )));
            }
        }
        if self.min_segments == 0 {
            return Err(GridError::config("min_segments must be positive"));
        }
        if self.threshold.block_size < 3 {
            return Err(GridError::config("threshold.block_size must be at least 3"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = SegmentationParams::default();
        assert_eq!(p.tol, 10);
        assert_eq!(p.max_skew, 20.0);
        assert_eq!(p.ang_thr, 5.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let base = SegmentationParams::default();
        assert!(base.clone().with_tol(0).validate().is_err());
        assert!(base.clone().with_tol(201).validate().is_err());
        assert!(base.clone().with_max_skew(-1.0).validate().is_err());
        assert!(base.clone().with_max_skew(f32::NAN).validate().is_err());
        assert!(base.clone().with_ang_thr(45.0).validate().is_err());
        assert!(base.clone().with_ang_thr(0.0).validate().is_ok());

        let mut flat = base;
        flat.grid_hough.theta_step_deg = 0.0;
        assert!(flat.validate().is_err());
    }

    #[test]
    fn relaxed_loosens_tolerances() {
        let p = SegmentationParams::default().relaxed();
        assert_eq!(p.tol, 20);
        assert_eq!(p.ang_thr, 10.0);
        assert_eq!(p.max_skew, 20.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let p: SegmentationParams = serde_json::from_str(r#"{"tol": 6, "ang_thr": 3.5}"#).unwrap();
        assert_eq!(p.tol, 6);
        assert_eq!(p.ang_thr, 3.5);
        assert_eq!(p.max_skew, 20.0);
        assert_eq!(p.grid_hough, HoughParams::grid());
    }
}
