use crate::error::{Result, checked_depth};
use crate::geometry::{ClosedPath, Point2D, Triangle};
use tracing::debug;

pub const KOCH_MAX_DEPTH: u32 = 10;

/// Koch snowflake outline around `seed`.
///
/// Each side is traced as `(start, end, opposite)` where `opposite` is the
/// vertex of an equilateral triangle on the inner side of the edge. The
/// top-level sides are `(p1, p2, p3)`, `(p2, p3, p1)` and `(p3, p1, p2)`.
/// A side is split at `a = (2s + e) / 3` and `b = (s + 2e) / 3` and gets the
/// peak `c = (2(s + e) - o) / 3`, which is the edge midpoint pushed a third of
/// the way further from `o`. The four sub-sides recurse with the opposite
/// vertex of their own equilateral bump, so every bump faces outward.
///
/// The path starts at `p1` and holds `3 * 4^depth` points. The seed should be
/// equilateral for the bumps to be exact equilateral triangles.
pub fn koch_snowflake(seed: Triangle, depth: i32) -> Result<ClosedPath> {
    let depth = checked_depth("depth", depth, KOCH_MAX_DEPTH)?;
    let Triangle { p1, p2, p3 } = seed;

    let mut points = Vec::with_capacity(3 * 4usize.pow(depth));
    points.push(p1);
    koch_side(&mut points, p1, p2, p3, depth);
    koch_side(&mut points, p2, p3, p1, depth);
    koch_side(&mut points, p3, p1, p2, depth);
    // the last side ends back on p1, which the closed path already implies
    points.pop();

    debug!(depth, points = points.len(), "generated koch snowflake");
    Ok(ClosedPath::new(points))
}

fn koch_side(path: &mut Vec<Point2D>, start: Point2D, end: Point2D, opposite: Point2D, depth: u32) {
    if depth == 0 {
        path.push(end);
        return;
    }
    let a = (start * 2.0 + end) / 3.0;
    let b = (start + end * 2.0) / 3.0;
    let peak = ((start + end) * 2.0 - opposite) / 3.0;

    let start_opposite = (opposite + start * 2.0) / 3.0;
    let end_opposite = (opposite + end * 2.0) / 3.0;

    koch_side(path, start, a, start_opposite, depth - 1);
    koch_side(path, a, peak, b, depth - 1);
    koch_side(path, peak, b, a, depth - 1);
    koch_side(path, b, end, end_opposite, depth - 1);
}
