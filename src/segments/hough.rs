use super::{HoughParams, LineSegment};
use crate::edges::EdgeMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const SHUFFLE_SEED: u64 = 0x6a1d_5eed;

struct Accumulator {
    votes: Vec<u32>,
    num_rho: usize,
    rho_offset: f32,
    trig: Vec<(f32, f32)>,
}

impl Accumulator {
    fn new(width: usize, height: usize, theta_bins: usize) -> Self {
        let num_rho = 2 * (width + height) + 1;
        let step = 180.0 / theta_bins as f32;
        let trig = (0..theta_bins)
            .map(|n| {
                let t = (n as f32 * step).to_radians();
                (t.cos(), t.sin())
            })
            .collect();
        Self {
            votes: vec![0; theta_bins * num_rho],
            num_rho,
            rho_offset: (width + height) as f32,
            trig,
        }
    }

    #[inline]
    fn bin(&self, n: usize, x: usize, y: usize) -> usize {
        let (c, s) = self.trig[n];
        let r = (x as f32 * c + y as f32 * s + self.rho_offset).round() as usize;
        n * self.num_rho + r
    }

    /// Add the votes of one pixel; returns the strongest bin it touched.
    fn vote(&mut self, x: usize, y: usize) -> (usize, u32) {
        let mut best = (0, 0);
        for n in 0..self.trig.len() {
            let b = self.bin(n, x, y);
            self.votes[b] += 1;
            if self.votes[b] > best.1 {
                best = (n, self.votes[b]);
            }
        }
        best
    }

    fn unvote(&mut self, x: usize, y: usize) {
        for n in 0..self.trig.len() {
            let b = self.bin(n, x, y);
            self.votes[b] = self.votes[b].saturating_sub(1);
        }
    }
}

/// Follows an edge line away from a seed pixel.
///
/// Each step advances one pixel along the dominant axis of the direction.
/// Across that axis the walk keeps an offset from the nominal line: the pixel
/// at the current offset is tried first, then its two neighbours. A rule a
/// fraction of a degree off the accumulator angle is therefore followed along
/// its staircase. The offset is bounded by `drift_slope` pixels per step.
struct Tracer<'a> {
    mask: &'a [bool],
    width: usize,
    height: usize,
    max_gap: usize,
    drift_slope: f32,
}

impl Tracer<'_> {
    fn is_edge(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && self.mask[y as usize * self.width + x as usize]
    }

    /// Edge pixels admitted walking from `seed` along `dir`, nearest first.
    fn trace(&self, seed: (usize, usize), dir: (f32, f32)) -> Vec<(usize, usize)> {
        let major = dir.0.abs().max(dir.1.abs());
        let (sx, sy) = (dir.0 / major, dir.1 / major);
        let x_major = sx.abs() >= sy.abs();
        let extent = (if x_major { self.width } else { self.height }) as i64;

        let mut admitted = Vec::new();
        let mut drift = 0i64;
        let mut gap = 0;
        for step in 1usize.. {
            let t = step as f32;
            let nx = (seed.0 as f32 + sx * t).round() as i64;
            let ny = (seed.1 as f32 + sy * t).round() as i64;
            let along = if x_major { nx } else { ny };
            if along < 0 || along >= extent {
                break;
            }

            let max_drift = 2 + (t * self.drift_slope) as i64;
            let back = -drift.signum();
            let candidates = if drift == 0 {
                [0, -1, 1]
            } else {
                [drift, drift + back, drift - back]
            };
            let hit = candidates
                .into_iter()
                .filter(|d| d.abs() <= max_drift)
                .map(|d| if x_major { (nx, ny + d, d) } else { (nx + d, ny, d) })
                .find(|&(x, y, _)| self.is_edge(x, y));

            match hit {
                Some((x, y, d)) => {
                    drift = d;
                    gap = 0;
                    admitted.push((x as usize, y as usize));
                }
                None => {
                    gap += 1;
                    if gap > self.max_gap {
                        break;
                    }
                }
            }
        }
        admitted
    }
}

/// Detect finite line segments on a binary edge map.
pub fn hough_segments(edges: &EdgeMap, params: HoughParams) -> Vec<LineSegment> {
    let (w, h) = (edges.width, edges.height);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let min_length = params.min_length_px(w.min(h)) as i64;
    // Room for a line up to one and a half bins away from the voted angle.
    let drift_slope = (1.5 * params.theta_step_deg).to_radians().tan();

    let mut acc = Accumulator::new(w, h, params.theta_bins());
    let mut mask = edges.data.clone();
    let mut voted = vec![false; w * h];
    let mut points = edges.points();
    points.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));

    let mut segments = Vec::new();
    for &(px, py) in &points {
        let seed_idx = py * w + px;
        if !mask[seed_idx] {
            continue;
        }
        let (best_n, best_votes) = acc.vote(px, py);
        voted[seed_idx] = true;
        if best_votes < params.threshold {
            continue;
        }

        // The line runs perpendicular to the bin normal.
        let (c, s) = acc.trig[best_n];
        let (forward, backward) = {
            let tracer = Tracer {
                mask: &mask,
                width: w,
                height: h,
                max_gap: params.max_gap as usize,
                drift_slope,
            };
            (
                tracer.trace((px, py), (-s, c)),
                tracer.trace((px, py), (s, -c)),
            )
        };
        let end_a = forward.last().copied().unwrap_or((px, py));
        let end_b = backward.last().copied().unwrap_or((px, py));

        let span_x = (end_a.0 as i64 - end_b.0 as i64).abs();
        let span_y = (end_a.1 as i64 - end_b.1 as i64).abs();
        let good = span_x >= min_length || span_y >= min_length;

        for &(x, y) in std::iter::once(&(px, py)).chain(&forward).chain(&backward) {
            let idx = y * w + x;
            if good && voted[idx] {
                acc.unvote(x, y);
                voted[idx] = false;
            }
            mask[idx] = false;
        }

        if good {
            segments.push(LineSegment::new(
                end_a.0 as i32,
                end_a.1 as i32,
                end_b.0 as i32,
                end_b.1 as i32,
            ));
        }
    }

    segments
}
