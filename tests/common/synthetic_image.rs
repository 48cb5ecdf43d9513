use manuscript_grid::RasterImage;

/// A ruled sheet: `rows × cols` square cells of `cell` px, dark rules of
/// `thickness` px, `margin` px of paper around the grid.
#[derive(Clone, Copy, Debug)]
pub struct SheetSpec {
    pub rows: usize,
    pub cols: usize,
    pub cell: usize,
    pub margin: usize,
    pub thickness: usize,
}

impl Default for SheetSpec {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 5,
            cell: 60,
            margin: 40,
            thickness: 3,
        }
    }
}

impl SheetSpec {
    pub fn width(&self) -> usize {
        2 * self.margin + self.cols * self.cell
    }

    pub fn height(&self) -> usize {
        2 * self.margin + self.rows * self.cell
    }

    /// Centre columns of the vertical rules.
    pub fn line_xs(&self) -> Vec<i32> {
        (0..=self.cols)
            .map(|k| (self.margin + k * self.cell) as i32)
            .collect()
    }

    /// Centre rows of the horizontal rules.
    pub fn line_ys(&self) -> Vec<i32> {
        (0..=self.rows)
            .map(|k| (self.margin + k * self.cell) as i32)
            .collect()
    }

    /// True when the (unrotated) sheet point `(x, y)` lies on a rule.
    fn is_ink(&self, x: f32, y: f32) -> bool {
        let half = self.thickness as f32 / 2.0;
        let lo = self.margin as f32 - half;
        let hi_x = (self.margin + self.cols * self.cell) as f32 + half;
        let hi_y = (self.margin + self.rows * self.cell) as f32 + half;
        if x < lo || y < lo || x >= hi_x || y >= hi_y {
            return false;
        }
        let near = |v: f32| {
            let off = (v - self.margin as f32).rem_euclid(self.cell as f32);
            off < half || off >= self.cell as f32 - half
        };
        near(x) || near(y)
    }
}

/// Axis-aligned sheet; rule `k` covers `[c - t/2, c + t/2)` around its centre.
pub fn grid_sheet(spec: SheetSpec) -> RasterImage {
    RasterImage::from_fn(spec.width(), spec.height(), |x, y| {
        if spec.is_ink(x as f32 + 0.5, y as f32 + 0.5) {
            0
        } else {
            255
        }
    })
}

/// Maps canvas points back onto an unrotated sheet that was turned by
/// `angle_deg` about its centre and padded by `pad` px on every side.
struct Placement {
    spec: SheetSpec,
    cos: f32,
    sin: f32,
    centre: (f32, f32),
    width: usize,
    height: usize,
}

impl Placement {
    fn new(spec: SheetSpec, angle_deg: f32, pad: usize) -> Self {
        let t = angle_deg.to_radians();
        let (width, height) = (spec.width() + 2 * pad, spec.height() + 2 * pad);
        Self {
            spec,
            cos: t.cos(),
            sin: t.sin(),
            centre: (width as f32 / 2.0, height as f32 / 2.0),
            width,
            height,
        }
    }

    fn is_ink(&self, x: f32, y: f32) -> bool {
        let (px, py) = (x - self.centre.0, y - self.centre.1);
        // inverse rotation back into sheet coordinates
        let qx = self.cos * px + self.sin * py + self.spec.width() as f32 / 2.0;
        let qy = -self.sin * px + self.cos * py + self.spec.height() as f32 / 2.0;
        self.spec.is_ink(qx, qy)
    }
}

/// The same sheet rotated by `angle_deg` (image coordinates, y down) about
/// its centre on a canvas padded by `pad` px on every side, so horizontal
/// rules end up oriented at `angle_deg`. One sample per pixel, hard edges.
pub fn rotated_grid_sheet(spec: SheetSpec, angle_deg: f32, pad: usize) -> RasterImage {
    let place = Placement::new(spec, angle_deg, pad);
    RasterImage::from_fn(place.width, place.height, |x, y| {
        if place.is_ink(x as f32 + 0.5, y as f32 + 0.5) {
            0
        } else {
            255
        }
    })
}

/// [`rotated_grid_sheet`] with `samples × samples` supersampling per pixel,
/// so rule edges get the grey ramps a scanner produces.
pub fn antialiased_grid_sheet(spec: SheetSpec, angle_deg: f32, pad: usize, samples: usize) -> RasterImage {
    let place = Placement::new(spec, angle_deg, pad);
    let n = samples.max(1);
    let step = 1.0 / n as f32;
    RasterImage::from_fn(place.width, place.height, |x, y| {
        let mut ink = 0usize;
        for j in 0..n {
            for i in 0..n {
                let sx = x as f32 + (i as f32 + 0.5) * step;
                let sy = y as f32 + (j as f32 + 0.5) * step;
                if place.is_ink(sx, sy) {
                    ink += 1;
                }
            }
        }
        let paper = 1.0 - ink as f32 / (n * n) as f32;
        (255.0 * paper).round() as u8
    })
}

/// Paint a filled dark square of side `size` centred in cell `(row, col)`
/// (1-based) of an axis-aligned sheet.
pub fn mark_cell(image: &RasterImage, spec: SheetSpec, row: usize, col: usize, size: usize) -> RasterImage {
    let cx = spec.margin + (col - 1) * spec.cell + spec.cell / 2;
    let cy = spec.margin + (row - 1) * spec.cell + spec.cell / 2;
    let (x0, y0) = (cx - size / 2, cy - size / 2);
    RasterImage::from_fn(image.width(), image.height(), |x, y| {
        if (x0..x0 + size).contains(&x) && (y0..y0 + size).contains(&y) {
            0
        } else {
            image.get(x, y)
        }
    })
}

/// Blank page.
pub fn blank_page(width: usize, height: usize) -> RasterImage {
    RasterImage::filled(width, height, 255)
}
