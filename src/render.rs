use crate::scene::Drawing;
use rgeom::{AxisAlignedRect, Point2D, Segment};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, RenderTarget};
use sdl2::ttf::Font;

pub const BACKGROUND: Color = Color::BLACK;
const STROKE: Color = Color::RGB(187, 134, 252);
const OBSTACLE: Color = Color::MAGENTA;
const HUD_TEXT: Color = Color::YELLOW;
const STROKE_WIDTH: u8 = 2;
const HUD_MARGIN: i32 = 10;

// The gfx primitives read colours in the opposite byte order to the renderer.
fn to_abgr(color: Color) -> Color {
    Color::RGBA(color.a, color.b, color.g, color.r)
}

fn px(v: f32) -> i16 {
    v.clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

fn draw_segment<T: RenderTarget>(canvas: &mut Canvas<T>, segment: &Segment, color: Color) -> Result<(), String> {
    let Segment { a, b } = *segment;
    canvas.thick_line(px(a.x), px(a.y), px(b.x), px(b.y), STROKE_WIDTH, to_abgr(color))
}

fn draw_outline<T: RenderTarget>(canvas: &mut Canvas<T>, points: &[Point2D], color: Color) -> Result<(), String> {
    if points.len() < 3 {
        if let [a, b] = points {
            return draw_segment(canvas, &Segment::new(*a, *b), color);
        }
        return Ok(());
    }
    let xs: Vec<i16> = points.iter().map(|p| px(p.x)).collect();
    let ys: Vec<i16> = points.iter().map(|p| px(p.y)).collect();
    canvas.polygon(&xs, &ys, to_abgr(color))
}

fn draw_box<T: RenderTarget>(canvas: &mut Canvas<T>, rect: &AxisAlignedRect, color: Color) -> Result<(), String> {
    canvas.box_(
        px(rect.left()),
        px(rect.top()),
        px(rect.right()),
        px(rect.bottom()),
        to_abgr(color),
    )
}

/// Paints every primitive of the frame. The HUD is drawn separately because
/// it needs a font.
pub fn draw_frame<T: RenderTarget>(canvas: &mut Canvas<T>, drawing: &Drawing) -> Result<(), String> {
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();
    for rect in &drawing.boxes {
        draw_box(canvas, rect, OBSTACLE)?;
    }
    for outline in &drawing.outlines {
        draw_outline(canvas, outline, STROKE)?;
    }
    for segment in &drawing.lines {
        draw_segment(canvas, segment, STROKE)?;
    }
    Ok(())
}

pub fn draw_hud<T: RenderTarget>(canvas: &mut Canvas<T>, font: &Font<'_, '_>, lines: &[String]) -> Result<(), String> {
    let texture_creator = canvas.texture_creator();
    let mut y = HUD_MARGIN;
    for line in lines.iter().filter(|l| !l.is_empty()) {
        let text_surface = font
            .render(line)
            .blended(HUD_TEXT)
            .map_err(|e| e.to_string())?;
        let text_texture = texture_creator
            .create_texture_from_surface(&text_surface)
            .map_err(|e| e.to_string())?;
        let texture_query = text_texture.query();
        let target_rect = Rect::new(HUD_MARGIN, y, texture_query.width, texture_query.height);
        canvas.copy(&text_texture, None, Some(target_rect))?;
        y += texture_query.height as i32 + 2;
    }
    Ok(())
}
