use crate::error::{Result, checked_depth};
use crate::geometry::Triangle;
use crate::matrix::Matrix3;
use std::collections::VecDeque;
use tracing::debug;

pub const SIERPINSKI_MAX_DEPTH: u32 = 12;

/// Sierpinski subdivision, breadth first.
///
/// Every triangle is emitted when it is taken off the queue, so the output
/// holds all `depth + 1` generations in order: `(3^(depth+1) - 1) / 2`
/// triangles, of which the trailing `3^depth` are the leaves. The centre
/// triangle of each split is never generated.
pub fn sierpinski(seed: Triangle, depth: i32) -> Result<Vec<Triangle>> {
    let depth = checked_depth("depth", depth, SIERPINSKI_MAX_DEPTH)?;
    let total = (3usize.pow(depth + 1) - 1) / 2;
    let mut drawn = Vec::with_capacity(total);
    let mut queue = VecDeque::from([seed]);

    for round in 0..=depth {
        for _ in 0..queue.len() {
            let Some(triangle) = queue.pop_front() else {
                break;
            };
            drawn.push(triangle);
            if round == depth {
                continue;
            }
            let Triangle { p1, p2, p3 } = triangle;
            let [p12, p23, p31] = triangle.midpoints();
            queue.push_back(Triangle::new(p1, p12, p31));
            queue.push_back(Triangle::new(p12, p2, p23));
            queue.push_back(Triangle::new(p31, p23, p3));
        }
    }
    debug!(depth, triangles = drawn.len(), "generated sierpinski triangles");
    Ok(drawn)
}

/// Same as [`sierpinski`], with the seed first mapped through `transform`
/// (the demo uses this for its global scale and rotation).
pub fn sierpinski_with(seed: Triangle, depth: i32, transform: &Matrix3) -> Result<Vec<Triangle>> {
    checked_depth("depth", depth, SIERPINSKI_MAX_DEPTH)?;
    let seed = seed.try_map(|p| transform.map(p))?;
    sierpinski(seed, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;

    fn seed() -> Triangle {
        Triangle::new(Point2D::new(0.0, 0.0), Point2D::new(8.0, 0.0), Point2D::new(4.0, 8.0))
    }

    #[test]
    fn depth_zero_is_the_seed() {
        assert_eq!(sierpinski(seed(), 0).unwrap(), vec![seed()]);
    }

    #[test]
    fn depth_one_draws_parent_then_corners() {
        let out = sierpinski(seed(), 1).unwrap();
        assert_eq!(out.len(), 4);
        assert_eq!(out[0], seed());
        assert_eq!(out[1], Triangle::new(Point2D::new(0.0, 0.0), Point2D::new(4.0, 0.0), Point2D::new(2.0, 4.0)));
        assert_eq!(out[2], Triangle::new(Point2D::new(4.0, 0.0), Point2D::new(8.0, 0.0), Point2D::new(6.0, 4.0)));
        assert_eq!(out[3], Triangle::new(Point2D::new(2.0, 4.0), Point2D::new(6.0, 4.0), Point2D::new(4.0, 8.0)));
    }

    #[test]
    fn rejects_negative_and_oversized_depth() {
        assert!(sierpinski(seed(), -1).is_err());
        assert!(sierpinski(seed(), SIERPINSKI_MAX_DEPTH as i32 + 1).is_err());
        assert!(sierpinski_with(seed(), -2, &Matrix3::IDENTITY).is_err());
    }

    #[test]
    fn transform_moves_the_seed_only() {
        let shifted = sierpinski_with(seed(), 2, &Matrix3::translate(1.0, 1.0)).unwrap();
        let plain = sierpinski(seed(), 2).unwrap();
        assert_eq!(shifted.len(), plain.len());
        assert_eq!(shifted[0].p1, Point2D::new(1.0, 1.0));
    }
}
