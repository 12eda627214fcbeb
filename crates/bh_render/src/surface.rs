//! The drawing-target contract screens render against.
//!
//! `Surface` is the immediate-mode 2D canvas interface: fill and stroke
//! rectangles, aligned text, and image regions, all in logical surface
//! coordinates with the origin at the top-left and y growing downward.
//! Screens only ever see this trait; the GPU-backed implementation lives in
//! `canvas`, and tests substitute recording implementations.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Color = Color([0.0, 0.0, 0.0, 1.0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a,
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

pub trait Surface {
    /// Current logical size of the surface in surface coordinates.
    fn size(&self) -> (f32, f32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f32);

    /// Draw `text` with its top edge at `y`. For `TextAlign::Center`, `x` is
    /// the horizontal center of the rendered text; for `Left` it is the left
    /// edge. `size` is the text height in surface units.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, align: TextAlign);

    /// Draw the `src` pixel region of the image registered under `image_id`
    /// into the `dst` surface region. Unknown ids are a silent no-op; callers
    /// are expected to fall back to procedural drawing when an asset never
    /// loaded.
    fn draw_image(&mut self, image_id: &str, src: Rect, dst: Rect);
}
