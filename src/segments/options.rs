use serde::{Deserialize, Serialize};

/// Parameters of one probabilistic Hough pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoughParams {
    /// Accumulator votes needed before a line is walked.
    pub threshold: u32,
    /// Minimum segment length as a fraction of the shorter image side.
    pub min_length_frac: f32,
    /// Largest run of missing edge pixels bridged while walking a line.
    pub max_gap: u32,
    /// Angular bin width of the accumulator in degrees; must divide 180.
    #[serde(default = "default_theta_step")]
    pub theta_step_deg: f32,
}

fn default_theta_step() -> f32 {
    1.0
}

impl HoughParams {
    /// Settings for the skew-estimation pass.
    pub const fn skew() -> Self {
        Self {
            threshold: 80,
            min_length_frac: 0.25,
            max_gap: 15,
            theta_step_deg: 1.0,
        }
    }

    /// Settings for the grid-line pass on the deskewed image.
    ///
    /// The deskewed rules are off-axis by up to half a degree when the
    /// projection fallback picked the angle; half-degree bins keep such a
    /// rule inside one bin for a few hundred pixels.
    pub const fn grid() -> Self {
        Self {
            threshold: 120,
            min_length_frac: 0.2,
            max_gap: 10,
            theta_step_deg: 0.5,
        }
    }

    /// Minimum length in pixels for an image whose shorter side is `min_dim`.
    pub fn min_length_px(&self, min_dim: usize) -> u32 {
        (min_dim as f32 * self.min_length_frac).floor().max(0.0) as u32
    }

    /// Number of angular bins covering `[0°, 180°)`.
    pub fn theta_bins(&self) -> usize {
        (180.0 / self.theta_step_deg).round().max(1.0) as usize
    }

    pub fn is_valid(&self) -> bool {
        self.threshold > 0
            && self.min_length_frac > 0.0
            && self.min_length_frac <= 1.0
            && self.theta_step_deg.is_finite()
            && (0.05..=10.0).contains(&self.theta_step_deg)
    }
}
