use super::projection::projection_profile_skew;
use crate::angle::{median, std_dev};
use crate::detector::SegmentationParams;
use crate::edges::canny;
use crate::image::RasterImage;
use crate::segments::hough_segments;
use crate::types::{DeskewMethod, SkewEstimate};
use log::debug;

/// Outcome of the line-voting pass, kept for diagnostics.
#[derive(Clone, Debug, Default)]
pub struct LineVote {
    /// Segments returned by the Hough pass.
    pub segments: usize,
    /// Angles that survived the near-vertical and `max_skew` filters.
    pub angles: Vec<f32>,
    /// Median angle when the vote was accepted.
    pub accepted: Option<f32>,
}

/// Line-angle voting on the Canny edges of `gray`.
pub fn line_vote_skew(gray: &RasterImage, params: &SegmentationParams) -> LineVote {
    let edges = canny(gray, params.canny);
    let segments = hough_segments(&edges, params.skew_hough);
    let mut vote = LineVote {
        segments: segments.len(),
        ..LineVote::default()
    };
    if segments.len() < params.min_skew_votes {
        debug!(
            "line vote: {} segments (< {}) on {}x{} image",
            segments.len(),
            params.min_skew_votes,
            gray.width(),
            gray.height()
        );
        return vote;
    }

    vote.angles = segments
        .iter()
        .map(|s| s.angle_deg())
        .filter(|a| a.abs() <= params.near_vertical_deg && a.abs() <= params.max_skew)
        .collect();
    if vote.angles.len() >= params.min_skew_votes {
        let spread = std_dev(&vote.angles);
        if spread >= params.min_angle_spread_deg {
            vote.accepted = median(&vote.angles);
        } else {
            debug!(
                "line vote: spread {spread:.3} below {:.3}, deferring to projection",
                params.min_angle_spread_deg
            );
        }
    }
    vote
}

/// Estimate the corrective rotation for `gray`.
///
/// `binary` is the adaptive-threshold image used only by the projection
/// fallback.
pub fn estimate_skew(
    gray: &RasterImage,
    binary: &RasterImage,
    params: &SegmentationParams,
) -> (SkewEstimate, LineVote) {
    let vote = line_vote_skew(gray, params);
    if let Some(angle) = vote.accepted {
        debug!(
            "skew {angle:.3} from {} of {} segment angles",
            vote.angles.len(),
            vote.segments
        );
        return (
            SkewEstimate {
                angle,
                method: DeskewMethod::Hough,
            },
            vote,
        );
    }

    let scan = projection_profile_skew(binary, params.max_skew);
    (
        SkewEstimate {
            angle: scan.angle,
            method: DeskewMethod::Projection,
        },
        vote,
    )
}
