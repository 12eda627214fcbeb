//! Shared fixtures for screen tests.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bh_core::input::InputState;
use bh_core::layout::CanvasLayout;
use bh_core::save::SaveStore;
use bh_render::{Color, Rect, Surface, TextAlign};

use crate::screen::UpdateCtx;
use crate::state::StateManager;

fn temp_save_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("bh_test_save_{}_{}.json", std::process::id(), nanos))
}

/// Everything an `UpdateCtx` borrows, bundled for tests. The default window
/// matches the base canvas one-to-one, so window clicks land at the same
/// canvas coordinates.
pub struct TestHarness {
    pub input: InputState,
    pub states: StateManager,
    pub layout: CanvasLayout,
    pub window_size: (u32, u32),
    pub now_ms: u64,
    pub save: SaveStore,
    save_path: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let save_path = temp_save_path();
        Self {
            input: InputState::new(),
            states: StateManager::new(),
            layout: CanvasLayout::base(),
            window_size: (800, 400),
            now_ms: 0,
            save: SaveStore::open(&save_path),
            save_path,
        }
    }

    pub fn with_ctx<R>(&mut self, f: impl FnOnce(&mut UpdateCtx<'_>) -> R) -> R {
        let mut ctx = UpdateCtx {
            input: &mut self.input,
            states: &mut self.states,
            layout: &self.layout,
            window_size: self.window_size,
            now_ms: self.now_ms,
            save: &mut self.save,
        };
        f(&mut ctx)
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.save_path);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(Rect, Color),
    Stroke(Rect, Color, f32),
    Text(String, f32, f32),
    Image(String, Rect, Rect),
}

/// Surface stand-in that records every call instead of drawing.
pub struct RecordingSurface {
    pub size: (f32, f32),
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: (width, height),
            ops: Vec::new(),
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image(id, _, _) => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32) {
        self.ops.push(DrawOp::Stroke(rect, color, thickness));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, _color: Color, _align: TextAlign) {
        self.ops.push(DrawOp::Text(text.to_string(), x, y));
    }

    fn draw_image(&mut self, image_id: &str, src: Rect, dst: Rect) {
        self.ops.push(DrawOp::Image(image_id.to_string(), src, dst));
    }
}
