//! Pause screen: a dark overlay with Resume, Save, and Quit.
//!
//! Saving stays on this screen; only Resume and Quit leave it. The gameplay
//! screen underneath is never torn down, so Resume picks up mid-jump.

use bh_render::{Color, Rect, Surface, TextAlign};

use crate::screen::{Screen, UpdateCtx};
use crate::state::GameState;

const OVERLAY: Color = Color::rgba(0, 0, 0, 0.82);
const BUTTON_FILL: Color = Color::rgb(56, 61, 77);

const RESUME_CY: f32 = 0.40;
const SAVE_CY: f32 = 0.56;
const QUIT_CY: f32 = 0.72;

fn button_rect(width: f32, height: f32, center_y_frac: f32) -> Rect {
    let w = width * 0.3;
    let h = height * 0.12;
    Rect::new(
        width * 0.5 - w * 0.5,
        height * center_y_frac - h * 0.5,
        w,
        h,
    )
}

#[derive(Default)]
pub struct PauseScreen;

impl Screen for PauseScreen {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        let Some((cx, cy)) = ctx.take_click() else {
            return;
        };
        let (width, height) = (ctx.layout.width, ctx.layout.height);

        if button_rect(width, height, RESUME_CY).contains(cx, cy) {
            ctx.states.set_state(GameState::Gameplay);
        } else if button_rect(width, height, SAVE_CY).contains(cx, cy) {
            // Persist a progress record. There is nothing to snapshot yet
            // beyond marking the slot, so the record starts empty.
            if let Err(message) = ctx.save.put("boxhop", serde_json::json!({})) {
                log::warn!("save failed: {message}");
            }
        } else if button_rect(width, height, QUIT_CY).contains(cx, cy) {
            ctx.states.set_state(GameState::Menu);
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        surface.fill_rect(Rect::new(0.0, 0.0, width, height), OVERLAY);

        surface.draw_text(
            "Paused",
            width * 0.5,
            height * 0.18,
            height * 0.10,
            Color::WHITE,
            TextAlign::Center,
        );

        for (label, center_y) in [
            ("Resume", RESUME_CY),
            ("Save", SAVE_CY),
            ("Quit", QUIT_CY),
        ] {
            let button = button_rect(width, height, center_y);
            surface.fill_rect(button, BUTTON_FILL);
            surface.stroke_rect(button, Color::WHITE, 2.0);
            surface.draw_text(
                label,
                button.x + button.w * 0.5,
                button.y + button.h * 0.28,
                button.h * 0.45,
                Color::WHITE,
                TextAlign::Center,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSurface, TestHarness};

    fn paused_harness() -> TestHarness {
        let mut harness = TestHarness::new();
        harness.states.set_state(GameState::Pause);
        harness
    }

    fn click_button(harness: &mut TestHarness, center_y_frac: f32) {
        let rect = button_rect(800.0, 400.0, center_y_frac);
        harness
            .input
            .press_click((rect.x + rect.w * 0.5) as f64, (rect.y + rect.h * 0.5) as f64);
    }

    #[test]
    fn resume_returns_to_gameplay() {
        let mut harness = paused_harness();
        let mut screen = PauseScreen;
        click_button(&mut harness, RESUME_CY);
        harness.with_ctx(|ctx| screen.update(ctx));
        assert_eq!(harness.states.current(), GameState::Gameplay);
    }

    #[test]
    fn quit_returns_to_menu() {
        let mut harness = paused_harness();
        let mut screen = PauseScreen;
        click_button(&mut harness, QUIT_CY);
        harness.with_ctx(|ctx| screen.update(ctx));
        assert_eq!(harness.states.current(), GameState::Menu);
    }

    #[test]
    fn save_writes_record_and_stays_paused() {
        let mut harness = paused_harness();
        let mut screen = PauseScreen;
        click_button(&mut harness, SAVE_CY);
        harness.with_ctx(|ctx| screen.update(ctx));

        assert_eq!(harness.states.current(), GameState::Pause);
        assert!(harness.save.get("boxhop").is_some());
    }

    #[test]
    fn renders_all_three_buttons() {
        let mut screen = PauseScreen;
        let mut surface = RecordingSurface::new(800.0, 400.0);
        screen.render(&mut surface);
        let texts = surface.texts();
        for label in ["Paused", "Resume", "Save", "Quit"] {
            assert!(texts.contains(&label), "missing '{label}'");
        }
    }
}
