//! Debug renderings of the detected grid.
use crate::image::RasterImage;
use crate::types::GridLineSet;
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

/// Radius of the disc marking each intersection.
pub const INTERSECTION_RADIUS: i32 = 2;

const INK: Luma<u8> = Luma([255]);

/// Black canvas with every canonical line drawn white, 1 px, edge to edge.
pub fn render_grid_mask(width: usize, height: usize, grid: &GridLineSet) -> RasterImage {
    let mut canvas = GrayImage::new(width as u32, height as u32);
    if width == 0 || height == 0 {
        return RasterImage::from_gray_image(canvas);
    }
    let (right, bottom) = ((width - 1) as f32, (height - 1) as f32);
    for &x in &grid.xs {
        draw_line_segment_mut(&mut canvas, (x as f32, 0.0), (x as f32, bottom), INK);
    }
    for &y in &grid.ys {
        draw_line_segment_mut(&mut canvas, (0.0, y as f32), (right, y as f32), INK);
    }
    RasterImage::from_gray_image(canvas)
}

/// Black canvas with a filled white disc at every `(x, y)` intersection.
pub fn render_intersections(width: usize, height: usize, grid: &GridLineSet) -> RasterImage {
    let mut canvas = GrayImage::new(width as u32, height as u32);
    for (x, y) in grid.intersections() {
        draw_filled_circle_mut(&mut canvas, (x, y), INTERSECTION_RADIUS, INK);
    }
    RasterImage::from_gray_image(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridLineSet {
        GridLineSet {
            xs: vec![5, 20, 39],
            ys: vec![0, 15],
        }
    }

    #[test]
    fn mask_draws_full_length_lines() {
        let mask = render_grid_mask(40, 30, &grid());
        for y in 0..30 {
            assert_eq!(mask.get(5, y), 255);
            assert_eq!(mask.get(39, y), 255);
        }
        for x in 0..40 {
            assert_eq!(mask.get(x, 15), 255);
        }
        assert_eq!(mask.get(10, 10), 0);
        let g = grid();
        for y in 0..30 {
            for x in 0..40 {
                let on_line = g.xs.contains(&(x as i32)) || g.ys.contains(&(y as i32));
                if !on_line {
                    assert_eq!(mask.get(x, y), 0, "stray pixel at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn intersections_are_small_discs() {
        let img = render_intersections(40, 30, &grid());
        assert_eq!(img.get(20, 15), 255);
        assert_eq!(img.get(22, 15), 255);
        assert_eq!(img.get(20, 13), 255);
        assert_eq!(img.get(23, 15), 0);
        assert_eq!(img.get(12, 8), 0);
    }
}
