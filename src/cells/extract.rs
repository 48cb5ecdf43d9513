use super::{Cell, CellCollection};
use crate::error::{GridError, Result};
use crate::image::RasterImage;
use crate::types::{CellBox, CellId, GridLineSet, SkewEstimate};

/// Crop every `[xs[c], xs[c+1]) × [ys[r], ys[r+1])` rectangle, row-major.
///
/// The grid must be strictly ascending and lie inside `image`; detector
/// output always does.
pub fn extract_cells(
    image: &RasterImage,
    grid: &GridLineSet,
    skew: SkewEstimate,
) -> Result<CellCollection> {
    check_axis("xs", &grid.xs, image.width())?;
    check_axis("ys", &grid.ys, image.height())?;

    let mut cells = Vec::with_capacity(grid.cell_count());
    for (r, ys) in grid.ys.windows(2).enumerate() {
        for (c, xs) in grid.xs.windows(2).enumerate() {
            let bbox = CellBox {
                x: xs[0] as u32,
                y: ys[0] as u32,
                w: (xs[1] - xs[0]) as u32,
                h: (ys[1] - ys[0]) as u32,
            };
            let crop = image.crop(
                bbox.x as usize,
                bbox.y as usize,
                bbox.w as usize,
                bbox.h as usize,
            )?;
            cells.push(Cell {
                id: CellId::new(r as u32 + 1, c as u32 + 1),
                bbox,
                image: crop,
                skew,
                file: None,
            });
        }
    }
    Ok(CellCollection::new(cells))
}

fn check_axis(name: &str, coords: &[i32], limit: usize) -> Result<()> {
    if coords.windows(2).any(|w| w[0] >= w[1]) {
        return Err(GridError::config(format!(
            "{name} must be strictly ascending: {coords:?}"
        )));
    }
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first < 0 || last as i64 > limit as i64 {
            return Err(GridError::config(format!(
                "{name} span [{first}, {last}] leaves the image (size {limit})"
            )));
        }
    }
    Ok(())
}
