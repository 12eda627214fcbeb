//! Canvas sizing and pointer translation.
//!
//! The drawing surface is a logical 800x400 canvas that rescales with its
//! container (the OS window). `compute_layout` is a pure function of the
//! container width: the canvas keeps the 2:1 base aspect and reports the x/y
//! scale factors the gameplay tunables multiply by. It must run once before
//! the first render and again on every resize notification, so hit-test
//! geometry and physics scale never desync from what is on screen.

pub const BASE_WIDTH: f32 = 800.0;
pub const BASE_HEIGHT: f32 = 400.0;

const MIN_CONTAINER_WIDTH: f32 = 400.0;
const MAX_CONTAINER_WIDTH: f32 = 1600.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl CanvasLayout {
    /// Layout at the unscaled base size. What screens see before the first
    /// resize notification arrives.
    pub fn base() -> Self {
        compute_layout(BASE_WIDTH)
    }
}

pub fn compute_layout(container_width: f32) -> CanvasLayout {
    let width = container_width.clamp(MIN_CONTAINER_WIDTH, MAX_CONTAINER_WIDTH);
    let height = width * (BASE_HEIGHT / BASE_WIDTH);
    CanvasLayout {
        width,
        height,
        scale_x: width / BASE_WIDTH,
        scale_y: height / BASE_HEIGHT,
    }
}

/// Translate a window-space pointer position into surface coordinates, the
/// way a page-space click is mapped through a canvas bounding rectangle.
pub fn window_to_surface(
    pos: (f64, f64),
    window_size: (u32, u32),
    layout: &CanvasLayout,
) -> (f32, f32) {
    let wx = window_size.0.max(1) as f64;
    let wy = window_size.1.max(1) as f64;
    (
        (pos.0 / wx) as f32 * layout.width,
        (pos.1 / wy) as f32 * layout.height,
    )
}
