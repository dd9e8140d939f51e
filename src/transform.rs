//! Composition of elementary 2D transforms into a single [`Matrix3`] and the
//! point / polygon mapping that goes with it.

use crate::error::{GeomError, Result};
use crate::geometry::Point2D;
use crate::matrix::Matrix3;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementaryTransform {
    Translate { dx: f32, dy: f32 },
    Rotate { degrees: f32, pivot: Point2D },
    Scale { sx: f32, sy: f32 },
    /// Reflection across the line through the origin at `degrees` from +x.
    MirrorAcrossLine { degrees: f32 },
}

impl ElementaryTransform {
    pub fn translate(dx: f32, dy: f32) -> ElementaryTransform {
        ElementaryTransform::Translate { dx, dy }
    }

    /// Rotation about the origin.
    pub fn rotate(degrees: f32) -> ElementaryTransform {
        ElementaryTransform::Rotate {
            degrees,
            pivot: Point2D::ORIGIN,
        }
    }

    pub fn rotate_about(degrees: f32, pivot: Point2D) -> ElementaryTransform {
        ElementaryTransform::Rotate { degrees, pivot }
    }

    pub fn scale(sx: f32, sy: f32) -> ElementaryTransform {
        ElementaryTransform::Scale { sx, sy }
    }

    pub fn uniform_scale(s: f32) -> ElementaryTransform {
        ElementaryTransform::Scale { sx: s, sy: s }
    }

    pub fn mirror(degrees: f32) -> ElementaryTransform {
        ElementaryTransform::MirrorAcrossLine { degrees }
    }

    /// Homogeneous matrix for this single step.
    pub fn to_matrix(&self) -> Matrix3 {
        match *self {
            ElementaryTransform::Translate { dx, dy } => Matrix3::translate(dx, dy),
            ElementaryTransform::Rotate { degrees, pivot } => Matrix3::rotate_about(degrees, pivot),
            ElementaryTransform::Scale { sx, sy } => Matrix3::scale(sx, sy),
            ElementaryTransform::MirrorAcrossLine { degrees } => Matrix3::rotate(degrees)
                .concat(&Matrix3::scale(1.0, -1.0))
                .concat(&Matrix3::rotate(-degrees)),
        }
    }

    /// The transform that undoes this one. A zero scale factor has no
    /// inverse.
    pub fn inverse(&self) -> Result<ElementaryTransform> {
        let inverse = match *self {
            ElementaryTransform::Translate { dx, dy } => ElementaryTransform::translate(-dx, -dy),
            ElementaryTransform::Rotate { degrees, pivot } => {
                ElementaryTransform::rotate_about(-degrees, pivot)
            }
            ElementaryTransform::Scale { sx, sy } => {
                if sx == 0.0 || sy == 0.0 {
                    return Err(GeomError::invalid(
                        "scale",
                        format!("cannot invert a zero scale factor ({sx}, {sy})"),
                    ));
                }
                ElementaryTransform::scale(1.0 / sx, 1.0 / sy)
            }
            mirror @ ElementaryTransform::MirrorAcrossLine { .. } => mirror,
        };
        Ok(inverse)
    }
}

/// Folds the list left to right into one matrix: `compose([t1, t2, t3])` is
/// `t1 · t2 · t3`, so `t3` acts on a point first. An empty list yields the
/// identity.
pub fn compose(transforms: &[ElementaryTransform]) -> Matrix3 {
    let matrix = transforms
        .iter()
        .fold(Matrix3::IDENTITY, |acc, t| acc.concat(&t.to_matrix()));
    trace!(steps = transforms.len(), ?matrix, "composed transform");
    matrix
}

/// Reversed list of inverses; composing it undoes `compose(transforms)`.
pub fn inverse_pipeline(transforms: &[ElementaryTransform]) -> Result<Vec<ElementaryTransform>> {
    transforms.iter().rev().map(ElementaryTransform::inverse).collect()
}

/// Maps one point through `matrix`.
///
/// # Arguments
///
/// * `matrix` - Usually the result of [`compose`]
/// * `point` - The point to map
pub fn apply_point(matrix: &Matrix3, point: Point2D) -> Result<Point2D> {
    matrix.map(point)
}

/// Maps every vertex, keeping order. Fails as a whole if any vertex hits a
/// zero denominator.
pub fn apply_polygon(matrix: &Matrix3, polygon: &[Point2D]) -> Result<Vec<Point2D>> {
    polygon.iter().map(|&p| matrix.map(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_point(p: Point2D, x: f32, y: f32) {
        assert_abs_diff_eq!(p.x, x, epsilon = 1e-4);
        assert_abs_diff_eq!(p.y, y, epsilon = 1e-4);
    }

    #[test]
    fn translate_moves_origin() {
        let m = compose(&[ElementaryTransform::translate(5.0, 0.0)]);
        assert_point(apply_point(&m, Point2D::ORIGIN).unwrap(), 5.0, 0.0);
    }

    #[test]
    fn half_turn_negates() {
        let m = compose(&[ElementaryTransform::rotate(180.0)]);
        assert_point(apply_point(&m, Point2D::new(1.0, 0.0)).unwrap(), -1.0, 0.0);
    }

    #[test]
    fn last_transform_applies_first() {
        let m = compose(&[
            ElementaryTransform::translate(10.0, 0.0),
            ElementaryTransform::uniform_scale(3.0),
        ]);
        assert_point(apply_point(&m, Point2D::new(1.0, 1.0)).unwrap(), 13.0, 3.0);
    }

    #[test]
    fn mirror_across_diagonal_swaps_axes() {
        let m = compose(&[ElementaryTransform::mirror(45.0)]);
        assert_point(apply_point(&m, Point2D::new(2.0, 7.0)).unwrap(), 7.0, 2.0);
    }

    #[test]
    fn mirror_across_x_axis_flips_y() {
        let m = compose(&[ElementaryTransform::mirror(0.0)]);
        assert_point(apply_point(&m, Point2D::new(2.0, 7.0)).unwrap(), 2.0, -7.0);
    }

    #[test]
    fn rotate_about_pivot() {
        let m = compose(&[ElementaryTransform::rotate_about(90.0, Point2D::new(1.0, 1.0))]);
        assert_point(apply_point(&m, Point2D::new(2.0, 1.0)).unwrap(), 1.0, 2.0);
    }

    #[test]
    fn empty_pipeline_is_identity() {
        assert_eq!(compose(&[]), Matrix3::IDENTITY);
    }

    #[test]
    fn polygon_keeps_vertex_order() {
        let m = compose(&[ElementaryTransform::translate(1.0, 2.0)]);
        let out = apply_polygon(&m, &[Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)]).unwrap();
        assert_eq!(out, vec![Point2D::new(1.0, 2.0), Point2D::new(2.0, 2.0)]);
    }

    #[test]
    fn polygon_fails_whole_on_degenerate_vertex() {
        let m = Matrix3::from_rows([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
        let result = apply_polygon(&m, &[Point2D::new(1.0, 1.0), Point2D::new(4.0, 0.0)]);
        assert!(matches!(result, Err(GeomError::DegenerateTransform { .. })));
    }

    #[test]
    fn zero_scale_has_no_inverse() {
        assert!(ElementaryTransform::scale(0.0, 1.0).inverse().is_err());
        assert!(inverse_pipeline(&[ElementaryTransform::uniform_scale(0.0)]).is_err());
    }
}
