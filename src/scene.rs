use rand::SeedableRng;
use rand::rngs::StdRng;
use rgeom::camera::Camera;
use rgeom::figure::{FigurePose, monogram, place_figure};
use rgeom::fractal::{centered_square, koch_snowflake, nested_squares, sierpinski_with};
use rgeom::stepper::{Stepper, scatter_obstacles};
use rgeom::{
    AxisAlignedRect, ElementaryTransform, Point2D, Result, Segment, Size, Triangle, Velocity,
    apply_polygon, compose,
};
use tracing::info;

/// Ratio each nested square shrinks by
const SQUARE_RATIO: f32 = 0.08;
/// Share of the shorter canvas side taken by the outermost square / seed triangle
const SEED_FILL: f32 = 1.0 / 1.5;
/// Obstacles scattered when motion starts
const OBSTACLE_COUNT: i32 = 3;
/// Largest obstacle side as a share of the view
const OBSTACLE_MAX_FRACTION: f32 = 0.1;
/// Size of the bouncing body in pixels
const BODY_SIZE: Size = Size::new(64.0, 64.0);
/// Initial body velocity in pixels per second
const BODY_VELOCITY: Velocity = Velocity::new(180.0, 300.0);
/// Pixels moved per nudge key press
const NUDGE: f32 = 10.0;
/// Rotation step in degrees
const ROTATION_STEP: f32 = 5.0;
/// Deepest Koch curve offered by the controls
const KOCH_UI_MAX_DEPTH: i32 = 7;
/// Deepest Sierpinski subdivision offered by the controls
const SIERPINSKI_UI_MAX_DEPTH: i32 = 10;
/// Motion ticks allowed to catch up in a single frame
const MAX_TICKS_PER_FRAME: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneKind {
    Squares,
    Sierpinski,
    Koch,
    Bounce,
    Figure,
    Monogram,
}

impl SceneKind {
    const ALL: [SceneKind; 6] = [
        SceneKind::Squares,
        SceneKind::Sierpinski,
        SceneKind::Koch,
        SceneKind::Bounce,
        SceneKind::Figure,
        SceneKind::Monogram,
    ];

    fn index(self) -> usize {
        SceneKind::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    pub fn next(self) -> SceneKind {
        SceneKind::ALL[(self.index() + 1) % SceneKind::ALL.len()]
    }

    pub fn previous(self) -> SceneKind {
        let len = SceneKind::ALL.len();
        SceneKind::ALL[(self.index() + len - 1) % len]
    }

    pub fn title(self) -> &'static str {
        match self {
            SceneKind::Squares => "Nested squares",
            SceneKind::Sierpinski => "Sierpinski triangle",
            SceneKind::Koch => "Koch snowflake",
            SceneKind::Bounce => "Bounce",
            SceneKind::Figure => "Transform viewer",
            SceneKind::Monogram => "Monogram",
        }
    }
}

/// Input already decoded from the keyboard or mouse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    NextScene,
    PreviousScene,
    More,
    Less,
    RotateLeft,
    RotateRight,
    Grow,
    Shrink,
    ToggleMirror,
    ToggleMotion,
    Nudge(f32, f32),
    CenterCamera,
    ToggleFollow,
    /// Mouse cursor moved to this screen position
    PointerAt(f32, f32),
}

/// Screen-space primitives for one frame.
#[derive(Debug, Default)]
pub struct Drawing {
    pub lines: Vec<Segment>,
    /// Closed polygons, drawn as outlines
    pub outlines: Vec<Vec<Point2D>>,
    /// Filled rectangles
    pub boxes: Vec<AxisAlignedRect>,
    pub hud: Vec<String>,
}

pub struct Scene {
    kind: SceneKind,
    canvas: Size,
    step: f32,
    accumulator: f32,
    square_count: i32,
    sierpinski_depth: i32,
    sierpinski_scale: f32,
    sierpinski_rotation: f32,
    koch_depth: i32,
    koch_size: f32,
    pose: FigurePose,
    body: AxisAlignedRect,
    camera: Camera,
    follow_mouse: bool,
    stepper: Stepper,
    rng: StdRng,
}

impl Scene {
    /// Builds the viewer state with every scene at its default settings.
    ///
    /// # Arguments
    ///
    /// * `kind` - Scene shown first
    /// * `canvas` - Drawable size in pixels
    /// * `fps` - Frame rate; the motion step is `1 / fps` seconds
    /// * `seed` - Seed for the obstacle layout, random when `None`
    pub fn new(kind: SceneKind, canvas: Size, fps: u32, seed: Option<u64>) -> Scene {
        let center = Point2D::new(canvas.width / 2.0, canvas.height / 2.0);
        let body_top_left = center - Point2D::new(BODY_SIZE.width / 2.0, BODY_SIZE.height / 2.0);
        Scene {
            kind,
            canvas,
            step: 1.0 / fps.max(1) as f32,
            accumulator: 0.0,
            square_count: 50,
            sierpinski_depth: 5,
            sierpinski_scale: 0.5,
            sierpinski_rotation: 180.0,
            koch_depth: 1,
            koch_size: 100.0,
            pose: FigurePose {
                position: center,
                ..FigurePose::default()
            },
            body: AxisAlignedRect::new(body_top_left, BODY_SIZE),
            camera: Camera::default(),
            follow_mouse: false,
            stepper: Stepper::new(),
            rng: seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64),
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn is_moving(&self) -> bool {
        self.stepper.is_running()
    }

    pub fn handle(&mut self, command: Command) -> Result<()> {
        if let Command::PointerAt(x, y) = command {
            return self.follow_pointer(Point2D::new(x, y));
        }
        match (self.kind, command) {
            (_, Command::NextScene) => self.switch(self.kind.next()),
            (_, Command::PreviousScene) => self.switch(self.kind.previous()),

            (SceneKind::Squares, Command::More) => self.square_count = (self.square_count + 1).min(100),
            (SceneKind::Squares, Command::Less) => self.square_count = (self.square_count - 1).max(1),

            (SceneKind::Sierpinski, Command::More) => {
                self.sierpinski_depth = (self.sierpinski_depth + 1).min(SIERPINSKI_UI_MAX_DEPTH)
            }
            (SceneKind::Sierpinski, Command::Less) => self.sierpinski_depth = (self.sierpinski_depth - 1).max(0),
            (SceneKind::Sierpinski, Command::Grow) => self.sierpinski_scale = (self.sierpinski_scale + 0.1).min(10.0),
            (SceneKind::Sierpinski, Command::Shrink) => self.sierpinski_scale = (self.sierpinski_scale - 0.1).max(0.0),
            (SceneKind::Sierpinski, Command::RotateLeft) => {
                self.sierpinski_rotation = wrap_degrees(self.sierpinski_rotation - ROTATION_STEP)
            }
            (SceneKind::Sierpinski, Command::RotateRight) => {
                self.sierpinski_rotation = wrap_degrees(self.sierpinski_rotation + ROTATION_STEP)
            }

            (SceneKind::Koch, Command::More) => self.koch_depth = (self.koch_depth + 1).min(KOCH_UI_MAX_DEPTH),
            (SceneKind::Koch, Command::Less) => self.koch_depth = (self.koch_depth - 1).max(0),
            (SceneKind::Koch, Command::Grow) => self.koch_size = (self.koch_size + 10.0).min(300.0),
            (SceneKind::Koch, Command::Shrink) => self.koch_size = (self.koch_size - 10.0).max(100.0),

            (SceneKind::Figure, Command::More | Command::Grow) => self.pose.scale = (self.pose.scale + 0.1).min(5.0),
            (SceneKind::Figure, Command::Less | Command::Shrink) => self.pose.scale = (self.pose.scale - 0.1).max(0.0),
            (SceneKind::Figure, Command::RotateLeft) => self.pose.rotation = wrap_degrees(self.pose.rotation - ROTATION_STEP),
            (SceneKind::Figure, Command::RotateRight) => self.pose.rotation = wrap_degrees(self.pose.rotation + ROTATION_STEP),
            (SceneKind::Figure, Command::ToggleMirror) => self.pose.mirror = !self.pose.mirror,
            (SceneKind::Figure, Command::Nudge(dx, dy)) => {
                self.pose.position = self.pose.position + Point2D::new(dx, dy) * NUDGE
            }

            (SceneKind::Bounce, Command::ToggleMotion) => self.toggle_motion()?,
            (SceneKind::Bounce, Command::Nudge(dx, dy)) => {
                self.move_body(self.body.top_left + Point2D::new(dx, dy) * NUDGE)?
            }
            (SceneKind::Bounce, Command::ToggleFollow) => self.follow_mouse = !self.follow_mouse,
            (SceneKind::Bounce, Command::CenterCamera) => self.camera.center_on(&self.body, self.canvas),

            _ => return Ok(()),
        }
        info!(scene = self.kind.title(), ?command, "input");
        Ok(())
    }

    /// Centres the body under the cursor while follow mode is on.
    fn follow_pointer(&mut self, screen: Point2D) -> Result<()> {
        if self.kind != SceneKind::Bounce || !self.follow_mouse {
            return Ok(());
        }
        let half = Point2D::new(self.body.size.width / 2.0, self.body.size.height / 2.0);
        self.move_body(self.camera.to_world(screen) - half)
    }

    fn move_body(&mut self, top_left: Point2D) -> Result<()> {
        self.body.top_left = top_left;
        if self.stepper.is_running() {
            self.stepper.reposition(top_left)?;
        }
        Ok(())
    }

    fn switch(&mut self, kind: SceneKind) {
        if self.kind == SceneKind::Bounce {
            self.stepper.stop();
        }
        self.kind = kind;
        self.accumulator = 0.0;
    }

    fn toggle_motion(&mut self) -> Result<()> {
        if self.stepper.is_running() {
            self.stepper.stop();
            return Ok(());
        }
        let view = self.camera.viewport(self.canvas);
        let obstacles = scatter_obstacles(&mut self.rng, &view, OBSTACLE_COUNT, OBSTACLE_MAX_FRACTION)?;
        self.stepper.start(self.body, BODY_VELOCITY, obstacles, view)?;
        self.accumulator = 0.0;
        Ok(())
    }

    /// Feeds elapsed wall time to the stepper in fixed ticks.
    pub fn update(&mut self, elapsed: f32) -> Result<()> {
        if !self.stepper.is_running() {
            return Ok(());
        }
        self.accumulator = (self.accumulator + elapsed).min(self.step * MAX_TICKS_PER_FRAME as f32);
        while self.accumulator >= self.step {
            let tick = self.stepper.tick(self.step)?;
            self.body.top_left = tick.position;
            self.accumulator -= self.step;
        }
        Ok(())
    }

    pub fn frame(&self) -> Result<Drawing> {
        let mut drawing = Drawing::default();
        drawing.hud.push(format!("{}  (Tab: next scene)", self.kind.title()));
        match self.kind {
            SceneKind::Squares => {
                let initial = centered_square(self.canvas, SEED_FILL);
                for square in nested_squares(self.square_count, SQUARE_RATIO, initial)? {
                    drawing.outlines.push(square.corners().to_vec());
                }
                drawing.hud.push(format!("Squares: {}  (Up/Down)", self.square_count));
            }
            SceneKind::Sierpinski => {
                for triangle in sierpinski_with(self.sierpinski_seed(), self.sierpinski_depth, &self.sierpinski_matrix())? {
                    drawing.outlines.push(triangle.vertices().to_vec());
                }
                drawing.hud.push(format!("Generations: {}  (Up/Down)", self.sierpinski_depth));
                drawing.hud.push(format!("Scale: {:.1}  (=/-)", self.sierpinski_scale));
                drawing.hud.push(format!("Rotation: {:.0}  (Left/Right)", self.sierpinski_rotation));
            }
            SceneKind::Koch => {
                let seed = Triangle::equilateral(Point2D::ORIGIN, self.koch_size);
                let path = koch_snowflake(seed, self.koch_depth)?;
                let centroid = (seed.p1 + seed.p2 + seed.p3) / 3.0;
                let placement = compose(&[
                    ElementaryTransform::translate(self.canvas.width / 2.0, self.canvas.height / 2.0),
                    ElementaryTransform::scale(1.0, -1.0),
                    ElementaryTransform::translate(-centroid.x, -centroid.y),
                ]);
                drawing.outlines.push(apply_polygon(&placement, &path.points)?);
                drawing.hud.push(format!("Depth: {}  (Up/Down)", self.koch_depth));
                drawing.hud.push(format!("Size: {:.0}  (=/-)", self.koch_size));
            }
            SceneKind::Bounce => {
                for obstacle in self.stepper.obstacles() {
                    drawing.boxes.push(obstacle.translated(-self.camera.offset));
                }
                let body = self.body.translated(-self.camera.offset);
                drawing.outlines.push(body.corners().to_vec());
                let [a, b, c, d] = body.corners();
                drawing.lines.push(Segment::new(a, c));
                drawing.lines.push(Segment::new(b, d));
                drawing.hud.push(format!(
                    "Pos ({:.1}; {:.1})",
                    self.body.top_left.x, self.body.top_left.y
                ));
                let state = if self.stepper.is_running() { "Stop moving" } else { "Start moving" };
                drawing.hud.push(format!("Space: {state}  H/J/K/L: move  C: centre"));
                let follow = if self.follow_mouse { "on" } else { "off" };
                drawing.hud.push(format!("F: follow mouse ({follow})"));
            }
            SceneKind::Figure => {
                drawing.outlines.push(place_figure(&self.pose)?);
                let side = self.canvas.width.max(self.canvas.height);
                drawing.lines.push(Segment::new(Point2D::ORIGIN, Point2D::new(side, side)));
                drawing.hud.push(format!("Scale: {:.1}  (Up/Down)", self.pose.scale));
                drawing.hud.push(format!("Rotate: {:.0}  (Left/Right)", self.pose.rotation));
                drawing.hud.push(format!("Mirror: {}  (M)", self.pose.mirror));
            }
            SceneKind::Monogram => drawing.lines = monogram(),
        }
        Ok(drawing)
    }

    fn sierpinski_seed(&self) -> Triangle {
        let square = centered_square(self.canvas, SEED_FILL);
        Triangle::equilateral(square.top_left, square.size.width)
    }

    /// Scale about the canvas centre, then rotate about it.
    fn sierpinski_matrix(&self) -> rgeom::Matrix3 {
        let c = Point2D::new(self.canvas.width / 2.0, self.canvas.height / 2.0);
        compose(&[
            ElementaryTransform::rotate_about(self.sierpinski_rotation, c),
            ElementaryTransform::translate(c.x, c.y),
            ElementaryTransform::uniform_scale(self.sierpinski_scale),
            ElementaryTransform::translate(-c.x, -c.y),
        ])
    }
}

fn wrap_degrees(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(kind: SceneKind) -> Scene {
        Scene::new(kind, Size::new(800.0, 600.0), 60, Some(1))
    }

    #[test]
    fn scene_cycle_wraps_both_ways() {
        assert_eq!(SceneKind::Monogram.next(), SceneKind::Squares);
        assert_eq!(SceneKind::Squares.previous(), SceneKind::Monogram);
    }

    #[test]
    fn squares_frame_draws_one_outline_per_square() {
        let mut scene = scene(SceneKind::Squares);
        assert_eq!(scene.frame().unwrap().outlines.len(), 50);
        scene.handle(Command::Less).unwrap();
        assert_eq!(scene.frame().unwrap().outlines.len(), 49);
    }

    #[test]
    fn square_count_is_clamped_by_the_controls() {
        let mut scene = scene(SceneKind::Squares);
        for _ in 0..200 {
            scene.handle(Command::Less).unwrap();
        }
        assert_eq!(scene.frame().unwrap().outlines.len(), 1);
    }

    #[test]
    fn sierpinski_frame_counts_every_generation() {
        let scene = scene(SceneKind::Sierpinski);
        // depth 5: (3^6 - 1) / 2
        assert_eq!(scene.frame().unwrap().outlines.len(), 364);
    }

    #[test]
    fn koch_frame_is_a_single_outline() {
        let mut scene = scene(SceneKind::Koch);
        scene.handle(Command::More).unwrap();
        let drawing = scene.frame().unwrap();
        assert_eq!(drawing.outlines.len(), 1);
        assert_eq!(drawing.outlines[0].len(), 3 * 16);
    }

    #[test]
    fn bounce_starts_and_moves() {
        let mut scene = scene(SceneKind::Bounce);
        let before = scene.body;
        scene.update(1.0).unwrap();
        assert_eq!(scene.body, before);

        scene.handle(Command::ToggleMotion).unwrap();
        assert!(scene.is_moving());
        assert_eq!(scene.frame().unwrap().boxes.len(), OBSTACLE_COUNT as usize);
        scene.update(1.0 / 60.0 + 1e-4).unwrap();
        assert_ne!(scene.body, before);

        scene.handle(Command::ToggleMotion).unwrap();
        assert!(!scene.is_moving());
        assert!(scene.frame().unwrap().boxes.is_empty());
    }

    #[test]
    fn leaving_bounce_stops_motion() {
        let mut scene = scene(SceneKind::Bounce);
        scene.handle(Command::ToggleMotion).unwrap();
        scene.handle(Command::NextScene).unwrap();
        assert_eq!(scene.kind(), SceneKind::Figure);
        assert!(!scene.is_moving());
    }

    #[test]
    fn nudge_moves_the_body() {
        let mut scene = scene(SceneKind::Bounce);
        let before = scene.body.top_left;
        scene.handle(Command::Nudge(1.0, 0.0)).unwrap();
        assert_eq!(scene.body.top_left, before + Point2D::new(NUDGE, 0.0));
    }

    #[test]
    fn follow_mode_centres_the_body_on_the_cursor() {
        let mut scene = scene(SceneKind::Bounce);
        let before = scene.body.top_left;
        scene.handle(Command::PointerAt(100.0, 100.0)).unwrap();
        assert_eq!(scene.body.top_left, before);

        scene.handle(Command::ToggleFollow).unwrap();
        scene.handle(Command::PointerAt(100.0, 100.0)).unwrap();
        assert_eq!(scene.body.center(), Point2D::new(100.0, 100.0));
    }

    #[test]
    fn follow_mode_moves_a_running_body() {
        let mut scene = scene(SceneKind::Bounce);
        scene.handle(Command::ToggleFollow).unwrap();
        scene.handle(Command::ToggleMotion).unwrap();
        scene.handle(Command::PointerAt(500.0, 200.0)).unwrap();
        let expected = Point2D::new(500.0 - BODY_SIZE.width / 2.0, 200.0 - BODY_SIZE.height / 2.0);
        assert_eq!(scene.stepper.body().map(|b| b.top_left), Some(expected));
    }

    #[test]
    fn pointer_is_ignored_outside_bounce() {
        let mut scene = scene(SceneKind::Figure);
        scene.handle(Command::ToggleFollow).unwrap();
        scene.handle(Command::PointerAt(10.0, 10.0)).unwrap();
        assert!(!scene.follow_mouse);
    }

    #[test]
    fn figure_mirror_toggles() {
        let mut scene = scene(SceneKind::Figure);
        let plain = scene.frame().unwrap().outlines[0].clone();
        scene.handle(Command::ToggleMirror).unwrap();
        let mirrored = scene.frame().unwrap().outlines[0].clone();
        assert_ne!(plain, mirrored);
    }

    #[test]
    fn wrap_keeps_rotation_in_range() {
        assert_eq!(wrap_degrees(-5.0), 355.0);
        assert_eq!(wrap_degrees(365.0), 5.0);
    }
}
