use crate::error::{GeomError, Result, checked_depth};
use crate::geometry::{AxisAlignedRect, Point2D, Size};
use tracing::debug;

pub const NESTED_SQUARES_MAX_COUNT: u32 = 10_000;

/// Emits `count` squares, each one shrunk towards the bottom-right corner of
/// the previous: the next top-left lies `ratio` of the way along the
/// diagonal and the side is scaled by `1 - ratio`.
///
/// `count == 0` yields an empty list whatever the other arguments are.
///
/// # Arguments
///
/// * `count` - Number of squares, including `initial`
/// * `ratio` - Shrink step, strictly between 0 and 1
/// * `initial` - The outermost square
pub fn nested_squares(count: i32, ratio: f32, initial: AxisAlignedRect) -> Result<Vec<AxisAlignedRect>> {
    let count = checked_depth("count", count, NESTED_SQUARES_MAX_COUNT)?;
    if count == 0 {
        return Ok(Vec::new());
    }
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(GeomError::invalid("ratio", format!("must be in (0, 1), got {ratio}")));
    }
    initial.validate("initial")?;
    if initial.size.width <= 0.0 || initial.size.height <= 0.0 {
        return Err(GeomError::invalid("initial", "size must be strictly positive"));
    }

    let mut squares = Vec::with_capacity(count as usize);
    let mut current = initial;
    for _ in 0..count {
        squares.push(current);
        let top_left = Point2D::lerp(current.top_left, current.bottom_right(), ratio);
        let size = Size::new(current.size.width * (1.0 - ratio), current.size.height * (1.0 - ratio));
        current = AxisAlignedRect::new(top_left, size);
    }
    debug!(count, ratio, "generated nested squares");
    Ok(squares)
}

/// Square centred on a canvas, with side `fraction` of the canvas's shorter
/// side.
pub fn centered_square(canvas: Size, fraction: f32) -> AxisAlignedRect {
    let side = canvas.min_side() * fraction;
    let top_left = Point2D::new((canvas.width - side) / 2.0, (canvas.height - side) / 2.0);
    AxisAlignedRect::new(top_left, Size::new(side, side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit() -> AxisAlignedRect {
        AxisAlignedRect::from_xywh(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn zero_count_ignores_other_arguments() {
        assert!(nested_squares(0, 0.08, unit()).unwrap().is_empty());
        assert!(nested_squares(0, 7.0, AxisAlignedRect::from_xywh(0.0, 0.0, -1.0, 0.0)).unwrap().is_empty());
    }

    #[test]
    fn first_square_is_the_initial_bounds() {
        let squares = nested_squares(3, 0.5, unit()).unwrap();
        assert_eq!(squares[0], unit());
        assert_eq!(squares[1], AxisAlignedRect::from_xywh(0.5, 0.5, 0.5, 0.5));
        assert_relative_eq!(squares[2].left(), 0.75);
        assert_relative_eq!(squares[2].size.width, 0.25);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(nested_squares(-1, 0.08, unit()).is_err());
        assert!(nested_squares(3, 0.0, unit()).is_err());
        assert!(nested_squares(3, 1.0, unit()).is_err());
        assert!(nested_squares(3, f32::NAN, unit()).is_err());
        assert!(nested_squares(3, 0.1, AxisAlignedRect::from_xywh(0.0, 0.0, 0.0, 1.0)).is_err());
        assert!(nested_squares(NESTED_SQUARES_MAX_COUNT as i32 + 1, 0.1, unit()).is_err());
    }

    #[test]
    fn centered_square_sits_in_the_middle() {
        let square = centered_square(Size::new(300.0, 150.0), 1.0 / 1.5);
        assert_relative_eq!(square.size.width, 100.0, epsilon = 1e-3);
        assert_relative_eq!(square.center().x, 150.0, epsilon = 1e-3);
        assert_relative_eq!(square.center().y, 75.0, epsilon = 1e-3);
    }
}
