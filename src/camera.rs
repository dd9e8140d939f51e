use crate::geometry::{AxisAlignedRect, Point2D, Size};

/// World-space offset of the screen's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub offset: Point2D,
}

impl Camera {
    pub fn new(offset: Point2D) -> Camera {
        Camera { offset }
    }

    /// The part of the world visible on a canvas of the given size.
    pub fn viewport(&self, canvas: Size) -> AxisAlignedRect {
        AxisAlignedRect::new(self.offset, canvas)
    }

    /// Moves the camera so `rect`'s centre lands on the canvas centre.
    pub fn center_on(&mut self, rect: &AxisAlignedRect, canvas: Size) {
        let center = rect.center();
        self.offset = Point2D::new(center.x - canvas.width / 2.0, center.y - canvas.height / 2.0);
    }

    /// Screen position of a world point.
    pub fn to_screen(&self, world: Point2D) -> Point2D {
        world - self.offset
    }

    /// World position under a screen point, e.g. the mouse cursor.
    pub fn to_world(&self, screen: Point2D) -> Point2D {
        screen + self.offset
    }
}
