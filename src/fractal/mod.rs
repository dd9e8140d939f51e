//! Fractal generators. Each one is a pure function from parameters to a flat,
//! draw-ordered list of primitives.
//!
//! Depths and counts come straight from host controls as `i32`; negative
//! values and values above the per-generator cap are rejected, since the
//! output grows exponentially with depth.

mod koch;
mod sierpinski;
mod squares;

pub use koch::{KOCH_MAX_DEPTH, koch_snowflake};
pub use sierpinski::{SIERPINSKI_MAX_DEPTH, sierpinski, sierpinski_with};
pub use squares::{NESTED_SQUARES_MAX_COUNT, centered_square, nested_squares};
