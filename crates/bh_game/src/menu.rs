//! Title screen. One button, one job.

use bh_render::{Color, Rect, Surface, TextAlign};

use crate::screen::{Screen, UpdateCtx};
use crate::state::GameState;

const BACKGROUND: Color = Color::rgb(23, 26, 38);
const BUTTON_FILL: Color = Color::rgb(69, 130, 181);

/// Start button rect for a given canvas size. Recomputed from fractions each
/// time so a resize between update and render cannot desync hit testing.
fn start_button_rect(width: f32, height: f32) -> Rect {
    let w = width * 0.35;
    let h = height * 0.15;
    Rect::new(width * 0.5 - w * 0.5, height * 0.55 - h * 0.5, w, h)
}

#[derive(Default)]
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        if let Some((cx, cy)) = ctx.take_click() {
            let button = start_button_rect(ctx.layout.width, ctx.layout.height);
            if button.contains(cx, cy) {
                ctx.states.set_state(GameState::Gameplay);
            }
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        surface.fill_rect(Rect::new(0.0, 0.0, width, height), BACKGROUND);

        surface.draw_text(
            "BOXHOP",
            width * 0.5,
            height * 0.25,
            height * 0.12,
            Color::WHITE,
            TextAlign::Center,
        );

        let button = start_button_rect(width, height);
        surface.fill_rect(button, BUTTON_FILL);
        surface.stroke_rect(button, Color::WHITE, 2.0);
        surface.draw_text(
            "Start",
            button.x + button.w * 0.5,
            button.y + button.h * 0.3,
            button.h * 0.4,
            Color::WHITE,
            TextAlign::Center,
        );
    }
}
