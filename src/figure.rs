//! Fixed drawings: the L-shaped figure posed by the transform viewer and the
//! line-drawn monogram.

use crate::error::Result;
use crate::geometry::{Point2D, Segment};
use crate::transform::{ElementaryTransform, apply_polygon, compose};

pub const L_FIGURE: [Point2D; 6] = [
    Point2D::new(0.0, 0.0),
    Point2D::new(0.0, 100.0),
    Point2D::new(150.0, 100.0),
    Point2D::new(150.0, 50.0),
    Point2D::new(50.0, 50.0),
    Point2D::new(50.0, 0.0),
];

/// Offset that puts the figure's bounding-box centre on the origin before it
/// is rotated and scaled.
const L_FIGURE_CENTER: Point2D = Point2D::new(75.0, 50.0);

/// Angle of the mirror line used when `mirror` is set.
pub const MIRROR_LINE_DEGREES: f32 = 45.0;

/// How the transform viewer places [`L_FIGURE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigurePose {
    pub position: Point2D,
    pub rotation: f32,
    pub scale: f32,
    pub mirror: bool,
}

impl Default for FigurePose {
    fn default() -> FigurePose {
        FigurePose {
            position: Point2D::ORIGIN,
            rotation: 0.0,
            scale: 1.0,
            mirror: false,
        }
    }
}

impl FigurePose {
    /// Centre the figure, rotate, scale, move to `position`, then optionally
    /// mirror the result across the 45° line.
    pub fn pipeline(&self) -> Vec<ElementaryTransform> {
        let mirror = if self.mirror {
            ElementaryTransform::mirror(MIRROR_LINE_DEGREES)
        } else {
            ElementaryTransform::uniform_scale(1.0)
        };
        vec![
            mirror,
            ElementaryTransform::translate(self.position.x, self.position.y),
            ElementaryTransform::uniform_scale(self.scale),
            ElementaryTransform::rotate(self.rotation),
            ElementaryTransform::translate(-L_FIGURE_CENTER.x, -L_FIGURE_CENTER.y),
        ]
    }
}

/// Vertices of [`L_FIGURE`] after the pose's pipeline.
///
/// # Arguments
///
/// * `pose` - Position, rotation in degrees, scale and mirror flag
pub fn place_figure(pose: &FigurePose) -> Result<Vec<Point2D>> {
    apply_polygon(&compose(&pose.pipeline()), &L_FIGURE)
}

const fn seg(ax: f32, ay: f32, bx: f32, by: f32) -> Segment {
    Segment::new(Point2D::new(ax, ay), Point2D::new(bx, by))
}

const MONOGRAM: [Segment; 9] = [
    // M
    seg(50.0, 50.0, 50.0, 150.0),
    seg(50.0, 50.0, 100.0, 100.0),
    seg(100.0, 100.0, 150.0, 50.0),
    seg(150.0, 50.0, 150.0, 150.0),
    // A
    seg(200.0, 150.0, 250.0, 50.0),
    seg(250.0, 50.0, 300.0, 150.0),
    seg(225.0, 100.0, 275.0, 100.0),
    // X
    seg(350.0, 50.0, 400.0, 150.0),
    seg(400.0, 50.0, 350.0, 150.0),
];

/// The letters "MAX" as straight strokes.
pub fn monogram() -> Vec<Segment> {
    MONOGRAM.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_pose_centres_figure_on_origin() {
        let placed = place_figure(&FigurePose::default()).unwrap();
        assert_eq!(placed.len(), L_FIGURE.len());
        assert_abs_diff_eq!(placed[0].x, -75.0, epsilon = 1e-4);
        assert_abs_diff_eq!(placed[0].y, -50.0, epsilon = 1e-4);
        assert_abs_diff_eq!(placed[2].x, 75.0, epsilon = 1e-4);
        assert_abs_diff_eq!(placed[2].y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn pose_moves_then_mirrors() {
        let pose = FigurePose {
            position: Point2D::new(300.0, 200.0),
            rotation: 0.0,
            scale: 2.0,
            mirror: true,
        };
        let placed = place_figure(&pose).unwrap();
        // (0,0) -> (-75,-50) -> (-150,-100) -> (150,100) -> mirrored (100,150)
        assert_abs_diff_eq!(placed[0].x, 100.0, epsilon = 1e-3);
        assert_abs_diff_eq!(placed[0].y, 150.0, epsilon = 1e-3);
    }

    #[test]
    fn monogram_has_nine_strokes() {
        let strokes = monogram();
        assert_eq!(strokes.len(), 9);
        assert!(strokes.iter().all(|s| s.length() > 0.0));
    }
}
