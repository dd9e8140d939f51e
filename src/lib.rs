//! A small 2D geometry engine: recursive fractal generators, a homogeneous
//! transform pipeline, and a fixed-step rectangle stepper with obstacle and
//! boundary bounces.
//!
//! Nothing in this crate draws. Every function takes plain parameters and
//! returns primitives (segments, triangles, rectangles, paths) for a host to
//! render.

pub mod camera;
pub mod error;
pub mod figure;
pub mod fractal;
pub mod geometry;
pub mod matrix;
pub mod stepper;
pub mod transform;

pub use error::{GeomError, Result};
pub use geometry::{AxisAlignedRect, ClosedPath, Point2D, Segment, Size, Triangle, Velocity};
pub use matrix::Matrix3;
pub use stepper::{Stepper, Tick};
pub use transform::{ElementaryTransform, apply_point, apply_polygon, compose};
