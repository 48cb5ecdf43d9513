//! 1D gap clustering of line coordinates.

/// Merge sorted coordinate samples into canonical positions.
///
/// Values are sorted, then walked in order; a new group starts whenever the
/// next value exceeds the last value admitted to the current group by more
/// than `tol`. Each group collapses to its mean, rounded to the nearest
/// integer. The output is strictly ascending, and clustering it again with
/// the same `tol` returns it unchanged.
pub fn cluster_coordinates(values: &[i32], tol: u32) -> Vec<i32> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let tol = tol as i64;
    let mut out = Vec::new();
    let mut sum = sorted[0] as i64;
    let mut count = 1i64;
    let mut last = sorted[0] as i64;
    for &v in &sorted[1..] {
        let v = v as i64;
        if v - last <= tol {
            sum += v;
            count += 1;
        } else {
            out.push(group_mean(sum, count));
            sum = v;
            count = 1;
        }
        last = v;
    }
    out.push(group_mean(sum, count));
    out
}

fn group_mean(sum: i64, count: i64) -> i32 {
    (sum as f64 / count as f64).round() as i32
}
