mod common;

use common::init_logging;
use common::synthetic_image::{antialiased_grid_sheet, grid_sheet, rotated_grid_sheet, SheetSpec};
use manuscript_grid::binarize::adaptive_threshold;
use manuscript_grid::deskew::{estimate_skew, line_vote_skew};
use manuscript_grid::{DeskewMethod, GridSegmenter, SegmentationParams};

/// Line voting without the uniform-spread guard, so clean synthetic rules
/// are accepted.
fn voting_params() -> SegmentationParams {
    SegmentationParams {
        min_angle_spread_deg: 0.0,
        ..SegmentationParams::default()
    }
}

/// Line voting can never collect enough votes.
fn projection_params() -> SegmentationParams {
    SegmentationParams {
        min_skew_votes: usize::MAX,
        ..SegmentationParams::default()
    }
}

#[test]
fn line_vote_recovers_rotation() {
    init_logging();
    // Seven horizontal rules give fourteen edges, comfortably above the
    // ten votes line voting needs.
    let spec = SheetSpec {
        rows: 6,
        ..SheetSpec::default()
    };
    for angle in [3.0f32, -4.0] {
        let page = rotated_grid_sheet(spec, angle, 40);
        let params = voting_params();
        let binary = adaptive_threshold(&page, params.threshold);
        let (skew, vote) = estimate_skew(&page, &binary, &params);
        assert_eq!(skew.method, DeskewMethod::Hough, "angle {angle}: {vote:?}");
        assert!(
            (skew.angle - angle).abs() <= 1.0,
            "expected ~{angle}, got {}",
            skew.angle
        );
        // Vertical rules never vote.
        assert!(vote.angles.iter().all(|a| a.abs() <= params.max_skew));
    }
}

#[test]
fn projection_fallback_recovers_rotation() {
    init_logging();
    let spec = SheetSpec::default();
    for angle in [3.0f32, -5.0] {
        let page = rotated_grid_sheet(spec, angle, 40);
        let params = projection_params();
        let binary = adaptive_threshold(&page, params.threshold);
        let (skew, _) = estimate_skew(&page, &binary, &params);
        assert_eq!(skew.method, DeskewMethod::Projection);
        assert!(
            (skew.angle - angle).abs() <= 1.0,
            "expected ~{angle}, got {}",
            skew.angle
        );
        assert_eq!(skew.angle.fract(), 0.0, "projection scans whole degrees");
    }
}

#[test]
fn uniform_angles_defer_to_projection() {
    // Every rule of an axis-aligned sheet votes exactly 0°, which the default
    // spread guard treats as untrustworthy.
    let page = grid_sheet(SheetSpec {
        rows: 6,
        ..SheetSpec::default()
    });
    let params = SegmentationParams::default();
    let vote = line_vote_skew(&page, &params);
    assert!(vote.angles.len() >= params.min_skew_votes, "{vote:?}");
    assert_eq!(vote.accepted, None);

    let binary = adaptive_threshold(&page, params.threshold);
    let (skew, _) = estimate_skew(&page, &binary, &params);
    assert_eq!(skew.method, DeskewMethod::Projection);
    assert_eq!(skew.angle, 0.0);
}

#[test]
fn rotated_sheet_segments_into_full_grid() {
    init_logging();
    let spec = SheetSpec {
        rows: 6,
        ..SheetSpec::default()
    };
    let page = rotated_grid_sheet(spec, 3.0, 40);
    let segmenter = GridSegmenter::new(voting_params()).unwrap();
    let result = segmenter.segment(&page).unwrap();

    assert_eq!(result.skew().method, DeskewMethod::Hough);
    assert_eq!(result.grid().xs.len(), spec.cols + 1, "{:?}", result.grid());
    assert_eq!(result.grid().ys.len(), spec.rows + 1, "{:?}", result.grid());
    assert_eq!(result.cells().len(), spec.rows * spec.cols);
    // Cells of a square grid stay roughly square after deskewing.
    for cell in result.cells() {
        let (w, h) = (cell.bbox.w as i64, cell.bbox.h as i64);
        assert!((w - spec.cell as i64).abs() <= 4, "{:?}", cell.bbox);
        assert!((h - spec.cell as i64).abs() <= 4, "{:?}", cell.bbox);
    }
}

#[test]
fn default_pipeline_segments_antialiased_sheets_across_angles() {
    init_logging();
    let spec = SheetSpec {
        cell: 80,
        ..SheetSpec::default()
    };
    let segmenter = GridSegmenter::new(SegmentationParams::default()).unwrap();

    let mut failures = Vec::new();
    for step in -12..=18 {
        let angle = step as f32 * 0.5;
        let page = antialiased_grid_sheet(spec, angle, 40, 4);
        match segmenter.segment(&page) {
            Ok(result) => {
                let grid = result.grid();
                let full = grid.xs.len() == spec.cols + 1
                    && grid.ys.len() == spec.rows + 1
                    && result.cells().len() == spec.rows * spec.cols;
                if !full {
                    failures.push(format!("{angle}°: skew {:?}, grid {grid:?}", result.skew()));
                }
            }
            Err(err) => failures.push(format!("{angle}°: {err}")),
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn antialiased_sheet_cells_keep_their_size() {
    init_logging();
    let spec = SheetSpec {
        cell: 80,
        ..SheetSpec::default()
    };
    let segmenter = GridSegmenter::new(SegmentationParams::default()).unwrap();
    for angle in [0.5f32, 3.5, -2.5] {
        let result = segmenter
            .segment(&antialiased_grid_sheet(spec, angle, 40, 4))
            .unwrap();
        assert!((result.skew().angle - angle).abs() <= 1.0, "{:?}", result.skew());
        for cell in result.cells() {
            let (w, h) = (cell.bbox.w as i64, cell.bbox.h as i64);
            assert!((w - spec.cell as i64).abs() <= 4, "{angle}°: {:?}", cell.bbox);
            assert!((h - spec.cell as i64).abs() <= 4, "{angle}°: {:?}", cell.bbox);
        }
    }
}
