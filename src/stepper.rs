//! Fixed-step motion of one rectangle among static obstacles inside a
//! bounding box.

use crate::error::{GeomError, Result, checked_depth};
use crate::geometry::{AxisAlignedRect, Point2D, Size, Velocity};
use rand::Rng;
use tracing::{debug, trace};

/// State owned by one run of the stepper, from `start` to `stop`.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub body: AxisAlignedRect,
    pub velocity: Velocity,
    pub obstacles: Vec<AxisAlignedRect>,
    pub bounds: AxisAlignedRect,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum StepperState {
    #[default]
    Idle,
    Running(Session),
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub position: Point2D,
    pub velocity: Velocity,
}

/// Which axis an obstacle hit reflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Default)]
pub struct Stepper {
    state: StepperState,
}

impl Stepper {
    /// An idle stepper.
    pub fn new() -> Stepper {
        Stepper::default()
    }

    /// Begins a session. A running session is replaced.
    ///
    /// # Arguments
    ///
    /// * `body` - The moving rectangle; its top-left corner is the position
    /// * `velocity` - Initial velocity in units per second
    /// * `obstacles` - Static rectangles, checked in this order every tick
    /// * `bounds` - Region the body bounces inside of
    pub fn start(
        &mut self,
        body: AxisAlignedRect,
        velocity: Velocity,
        obstacles: Vec<AxisAlignedRect>,
        bounds: AxisAlignedRect,
    ) -> Result<()> {
        body.validate("body")?;
        bounds.validate("bounds")?;
        for obstacle in &obstacles {
            obstacle.validate("obstacle")?;
        }
        if !(velocity.dx.is_finite() && velocity.dy.is_finite()) {
            return Err(GeomError::invalid("velocity", "must be finite"));
        }
        debug!(
            obstacles = obstacles.len(),
            x = body.left(),
            y = body.top(),
            "motion session started"
        );
        self.state = StepperState::Running(Session {
            body,
            velocity,
            obstacles,
            bounds,
        });
        Ok(())
    }

    /// Ends the session and drops its obstacles. Stopping an idle stepper is
    /// a no-op.
    pub fn stop(&mut self) {
        if self.is_running() {
            debug!("motion session stopped");
        }
        self.state = StepperState::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, StepperState::Running(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            StepperState::Running(session) => Some(session),
            StepperState::Idle => None,
        }
    }

    pub fn body(&self) -> Option<AxisAlignedRect> {
        self.session().map(|s| s.body)
    }

    pub fn velocity(&self) -> Option<Velocity> {
        self.session().map(|s| s.velocity)
    }

    /// Obstacles of the running session, empty when idle.
    pub fn obstacles(&self) -> &[AxisAlignedRect] {
        self.session().map(|s| s.obstacles.as_slice()).unwrap_or(&[])
    }

    /// Moves the body without touching its velocity.
    pub fn reposition(&mut self, position: Point2D) -> Result<()> {
        let StepperState::Running(session) = &mut self.state else {
            return Err(GeomError::NotRunning);
        };
        session.body.top_left = position;
        Ok(())
    }

    /// Advances the session by `dt`: move, bounce off the first overlapping
    /// obstacle, then bounce off the bounds.
    ///
    /// # Arguments
    ///
    /// * `dt` - Time step in seconds; must be positive and finite
    pub fn tick(&mut self, dt: f32) -> Result<Tick> {
        let StepperState::Running(session) = &mut self.state else {
            return Err(GeomError::NotRunning);
        };
        if !(dt.is_finite() && dt > 0.0) {
            return Err(GeomError::invalid("dt", format!("must be positive and finite, got {dt}")));
        }

        session.body.top_left = session.body.top_left + session.velocity.displacement(dt);

        if let Some((index, axis)) = obstacle_hit(&session.body, &session.obstacles) {
            trace!(index, ?axis, "obstacle bounce");
            match axis {
                Axis::Horizontal => session.velocity.reflect_x(),
                Axis::Vertical => session.velocity.reflect_y(),
            }
        }
        reflect_off_bounds(&session.body, &session.bounds, &mut session.velocity);

        Ok(Tick {
            position: session.body.top_left,
            velocity: session.velocity,
        })
    }
}

/// First obstacle overlapping `body`, with the axis of shallower penetration.
/// Equal depths count as a vertical hit.
pub fn obstacle_hit(body: &AxisAlignedRect, obstacles: &[AxisAlignedRect]) -> Option<(usize, Axis)> {
    obstacles
        .iter()
        .position(|obstacle| body.overlaps(obstacle))
        .map(|index| {
            let (x, y) = body.overlap_depths(&obstacles[index]);
            let axis = if x < y { Axis::Horizontal } else { Axis::Vertical };
            (index, axis)
        })
}

/// Reflects each axis on which the body pokes past `bounds`, whichever way it
/// is currently heading.
fn reflect_off_bounds(body: &AxisAlignedRect, bounds: &AxisAlignedRect, velocity: &mut Velocity) {
    if body.left() < bounds.left() || body.right() > bounds.right() {
        trace!("bounds bounce: horizontal");
        velocity.reflect_x();
    }
    if body.top() < bounds.top() || body.bottom() > bounds.bottom() {
        trace!("bounds bounce: vertical");
        velocity.reflect_y();
    }
}

/// Random obstacle set inside `view`: each top-left is uniform over the view
/// and each side is uniform in `[0, side * max_fraction)`.
///
/// # Arguments
///
/// * `rng` - Source of randomness; seed it for a repeatable layout
/// * `view` - Region the obstacles are spread over
/// * `count` - Number of obstacles, at most 1000
/// * `max_fraction` - Largest side as a share of the view, in `[0, 1]`
pub fn scatter_obstacles<R: Rng>(
    rng: &mut R,
    view: &AxisAlignedRect,
    count: i32,
    max_fraction: f32,
) -> Result<Vec<AxisAlignedRect>> {
    let count = checked_depth("count", count, 1_000)?;
    view.validate("view")?;
    if !(0.0..=1.0).contains(&max_fraction) {
        return Err(GeomError::invalid(
            "max_fraction",
            format!("must be in [0, 1], got {max_fraction}"),
        ));
    }
    let mut uniform = |start: f32, span: f32| start + span * rng.random::<f32>();
    let obstacles = (0..count)
        .map(|_| {
            let x = uniform(view.left(), view.size.width);
            let y = uniform(view.top(), view.size.height);
            let width = uniform(0.0, view.size.width * max_fraction);
            let height = uniform(0.0, view.size.height * max_fraction);
            AxisAlignedRect::new(Point2D::new(x, y), Size::new(width, height))
        })
        .collect();
    Ok(obstacles)
}
