use super::grad::sobel_gradients;
use super::nms::{non_max_suppression, EdgeClass};
use crate::image::{ImageF32, RasterImage};
use serde::{Deserialize, Serialize};

/// Hysteresis thresholds in Sobel magnitude units on 0..=255 input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub low: f32,
    pub high: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 150.0,
        }
    }
}

/// Binary edge map; `true` marks an edge pixel.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<bool>,
}

impl EdgeMap {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&e| e).count()
    }

    /// Edge pixel coordinates in row-major order.
    pub fn points(&self) -> Vec<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &e)| e)
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }
}

/// Canny edge detector: Sobel, NMS, hysteresis.
pub fn canny(gray: &RasterImage, params: CannyParams) -> EdgeMap {
    let grad = sobel_gradients(&ImageF32::from_raster(gray));
    let (w, h) = (grad.mag.w, grad.mag.h);
    let classes = non_max_suppression(&grad, params.low, params.high);

    let mut data = vec![false; w * h];
    let mut stack: Vec<usize> = classes
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == EdgeClass::Strong)
        .map(|(i, _)| i)
        .collect();
    for &i in &stack {
        data[i] = true;
    }

    while let Some(idx) = stack.pop() {
        let x = (idx % w) as isize;
        let y = (idx / w) as isize;
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let n = ny as usize * w + nx as usize;
                if !data[n] && classes[n] == EdgeClass::Weak {
                    data[n] = true;
                    stack.push(n);
                }
            }
        }
    }

    EdgeMap {
        width: w,
        height: h,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_image_has_no_edges() {
        let img = RasterImage::filled(32, 32, 255);
        assert_eq!(canny(&img, CannyParams::default()).count(), 0);
    }

    #[test]
    fn thin_rule_yields_edge_rows() {
        let img = RasterImage::from_fn(64, 40, |_, y| if y == 20 { 0 } else { 255 });
        let edges = canny(&img, CannyParams::default());
        // One edge row on each side of the rule, minus the border frame.
        assert!(edges.get(30, 19));
        assert!(edges.get(30, 21));
        assert!(!edges.get(30, 20));
        assert!(!edges.get(30, 10));
        assert_eq!(edges.count(), 2 * 62);
    }

    #[test]
    fn weak_pixels_survive_only_when_linked() {
        // Faint step (weak everywhere) next to a strong step.
        let img = RasterImage::from_fn(40, 40, |x, _| match x {
            0..=9 => 255,
            10..=29 => 0,
            _ => 20,
        });
        let edges = canny(&img, CannyParams::default());
        assert!(edges.get(9, 20) || edges.get(10, 20));
        assert!(!edges.get(29, 20) && !edges.get(30, 20));
    }
}
