use bh_core::input::InputState;
use bh_core::layout::{window_to_surface, CanvasLayout};
use bh_core::save::SaveStore;
use bh_render::Surface;

use crate::state::StateManager;

/// Everything a screen may touch during one fixed update step.
pub struct UpdateCtx<'a> {
    pub input: &'a mut InputState,
    pub states: &'a mut StateManager,
    pub layout: &'a CanvasLayout,
    pub window_size: (u32, u32),
    pub now_ms: u64,
    pub save: &'a mut SaveStore,
}

impl UpdateCtx<'_> {
    /// Consume the pending click, if any, translated into canvas coordinates.
    /// Only one screen sees each click.
    pub fn take_click(&mut self) -> Option<(f32, f32)> {
        self.input
            .take_click()
            .map(|pos| window_to_surface(pos, self.window_size, self.layout))
    }
}

/// One application screen. The driver calls `update` once per fixed step and
/// `render` once per frame, always on whichever screen the state machine
/// currently names.
pub trait Screen {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>);
    fn render(&mut self, surface: &mut dyn Surface);
    /// Final teardown, only on application exit.
    fn cleanup(&mut self) {}
}
