//! The playfield: one player box on one ground line.

use std::path::Path;

use bh_core::input::Key;
use bh_core::layout::CanvasLayout;
use bh_core::sprite::Sprite;
use bh_render::{Color, Rect, Surface, TextAlign};

use crate::assets::{AssetStore, LoadState};
use crate::player::{ground_y, PlayerBody, TickInput, BASE_GROUND_OFFSET};
use crate::screen::{Screen, UpdateCtx};
use crate::state::GameState;

pub const PLAYER_IMAGE: &str = "player";
const PLAYER_PATH: &str = "assets/images/player.png";
pub const BACKGROUND_IMAGE: &str = "background";
const BACKGROUND_PATH: &str = "assets/images/background.png";

/// Background tile pitch in canvas units.
const TILE_SIZE: f32 = 64.0;

const SKY: Color = Color::rgb(13, 15, 31);
const GROUND: Color = Color::rgb(92, 64, 33);
const GRASS: Color = Color::rgb(59, 158, 64);
const PLAYER_FALLBACK: Color = Color::rgb(240, 128, 107);

pub struct GameplayScreen {
    body: PlayerBody,
    sprite: Sprite,
    asset_phase: LoadState,
    player_loaded: bool,
    background_loaded: bool,
}

impl GameplayScreen {
    pub fn new(layout: &CanvasLayout) -> Self {
        Self {
            body: PlayerBody::new(layout),
            sprite: Sprite::new(PLAYER_IMAGE, 32, 32, 4, 150),
            asset_phase: LoadState::NotLoaded,
            player_loaded: false,
            background_loaded: false,
        }
    }

    /// Kick off asset loading on first entry. Later entries (resuming from
    /// pause) see the Ready phase and skip straight through.
    pub fn enter(&mut self, assets: &mut AssetStore) {
        if self.asset_phase == LoadState::Ready {
            return;
        }
        self.asset_phase = LoadState::Loading;
        self.player_loaded =
            assets.load_image(PLAYER_IMAGE, Path::new(PLAYER_PATH)) == LoadState::Ready;
        self.background_loaded =
            assets.load_image(BACKGROUND_IMAGE, Path::new(BACKGROUND_PATH)) == LoadState::Ready;
        self.asset_phase = LoadState::Ready;
    }

    pub fn asset_phase(&self) -> LoadState {
        self.asset_phase
    }

    pub fn apply_layout(&mut self, old: &CanvasLayout, new: &CanvasLayout) {
        self.body.apply_layout(old, new);
    }
}

impl Screen for GameplayScreen {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        let input = TickInput {
            left: ctx.input.is_held(Key::Left) || ctx.input.is_held(Key::A),
            right: ctx.input.is_held(Key::Right) || ctx.input.is_held(Key::D),
            jump: ctx.input.is_held(Key::Space)
                || ctx.input.is_held(Key::W)
                || ctx.input.is_held(Key::Up),
        };
        self.body.step(input, ctx.layout.width, ground_y(ctx.layout));

        self.sprite.update(ctx.now_ms);

        // Level-triggered on purpose: if Escape is still down when the pause
        // screen resumes, the very next tick pauses again.
        if ctx.input.is_held(Key::Escape) {
            ctx.states.set_state(GameState::Pause);
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        let scale_y = height / bh_core::layout::BASE_HEIGHT;
        let ground_top = height - BASE_GROUND_OFFSET * scale_y;

        surface.fill_rect(Rect::new(0.0, 0.0, width, height), SKY);

        if self.background_loaded {
            let src = Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE);
            let mut y = 0.0;
            while y < height {
                let mut x = 0.0;
                while x < width {
                    surface.draw_image(BACKGROUND_IMAGE, src, Rect::new(x, y, TILE_SIZE, TILE_SIZE));
                    x += TILE_SIZE;
                }
                y += TILE_SIZE;
            }
        }

        surface.fill_rect(
            Rect::new(0.0, ground_top, width, height - ground_top),
            GROUND,
        );
        surface.fill_rect(Rect::new(0.0, ground_top, width, 6.0 * scale_y), GRASS);

        let body_rect = Rect::new(self.body.x, self.body.y, self.body.w, self.body.h);
        if self.player_loaded {
            let src = Rect::new(
                self.sprite.frame_offset_x(),
                0.0,
                self.sprite.frame_width as f32,
                self.sprite.frame_height as f32,
            );
            surface.draw_image(&self.sprite.id, src, body_rect);
        } else {
            surface.fill_rect(body_rect, PLAYER_FALLBACK);
        }

        // Eyes go on top of sprite and fallback alike.
        let eye = self.body.w * 0.15;
        let pupil = eye * 0.5;
        for ex in [self.body.x + self.body.w * 0.2, self.body.x + self.body.w * 0.6] {
            let ey = self.body.y + self.body.h * 0.2;
            surface.fill_rect(Rect::new(ex, ey, eye, eye), Color::WHITE);
            surface.fill_rect(
                Rect::new(ex + eye * 0.25, ey + eye * 0.25, pupil, pupil),
                Color::BLACK,
            );
        }

        for (line, offset) in [
            (format!("pos: ({:.1}, {:.1})", self.body.x, self.body.y), 60.0),
            (format!("vel: ({:.1}, {:.1})", self.body.vx, self.body.vy), 40.0),
            (format!("grounded: {}", self.body.on_ground), 20.0),
        ] {
            surface.draw_text(
                &line,
                10.0,
                height - offset,
                14.0,
                Color::WHITE,
                TextAlign::Left,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, RecordingSurface, TestHarness};

    fn gameplay_harness() -> TestHarness {
        let mut harness = TestHarness::new();
        harness.states.set_state(GameState::Gameplay);
        harness
    }

    #[test]
    fn held_escape_pauses_every_tick() {
        let mut harness = gameplay_harness();
        let layout = harness.layout;
        let mut screen = GameplayScreen::new(&layout);

        harness.input.key_down(Key::Escape);
        harness.with_ctx(|ctx| screen.update(ctx));
        assert_eq!(harness.states.current(), GameState::Pause);

        // The key is still held after resuming, so the next tick re-pauses.
        harness.states.set_state(GameState::Gameplay);
        harness.with_ctx(|ctx| screen.update(ctx));
        assert_eq!(harness.states.current(), GameState::Pause);
    }

    #[test]
    fn direction_keys_move_the_body() {
        let mut harness = gameplay_harness();
        let layout = harness.layout;
        let mut screen = GameplayScreen::new(&layout);
        let start_x = screen.body.x;

        harness.input.key_down(Key::D);
        harness.with_ctx(|ctx| screen.update(ctx));
        assert!(screen.body.x > start_x);
        assert!(screen.body.vx > 0.0);

        harness.input.key_up(Key::D);
        harness.input.key_down(Key::Left);
        harness.with_ctx(|ctx| screen.update(ctx));
        assert!(screen.body.vx < 0.0);
    }

    #[test]
    fn jump_key_leaves_the_ground() {
        let mut harness = gameplay_harness();
        let layout = harness.layout;
        let mut screen = GameplayScreen::new(&layout);

        harness.input.key_down(Key::Space);
        harness.with_ctx(|ctx| screen.update(ctx));
        assert!(!screen.body.on_ground);
        assert!(screen.body.vy < 0.0);
    }

    #[test]
    fn enter_is_idempotent_once_ready() {
        let mut assets = AssetStore::new();
        let layout = CanvasLayout::base();
        let mut screen = GameplayScreen::new(&layout);
        assert_eq!(screen.asset_phase(), LoadState::NotLoaded);

        screen.enter(&mut assets);
        assert_eq!(screen.asset_phase(), LoadState::Ready);
        let loaded = screen.player_loaded;

        screen.enter(&mut assets);
        assert_eq!(screen.player_loaded, loaded);
    }

    #[test]
    fn one_failed_image_does_not_block_the_other() {
        // Pre-seed the background id from a real file; the player path does
        // not exist, so its load fails while the background stays usable.
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let bg_path = std::env::temp_dir().join(format!("bh_bg_{}_{nanos}.png", std::process::id()));
        image::RgbaImage::from_pixel(64, 64, image::Rgba([8, 8, 24, 255]))
            .save(&bg_path)
            .unwrap();

        let mut assets = AssetStore::new();
        assert_eq!(assets.load_image(BACKGROUND_IMAGE, &bg_path), LoadState::Ready);

        let layout = CanvasLayout::base();
        let mut screen = GameplayScreen::new(&layout);
        screen.enter(&mut assets);

        assert_eq!(screen.asset_phase(), LoadState::Ready);
        assert!(screen.background_loaded);
        assert!(!screen.player_loaded);

        // The failed slot falls back to the rectangle; the good one tiles.
        let mut surface = RecordingSurface::new(800.0, 400.0);
        screen.render(&mut surface);
        assert!(surface.images().contains(&BACKGROUND_IMAGE));
        assert!(!surface.images().contains(&PLAYER_IMAGE));

        let _ = std::fs::remove_file(&bg_path);
    }

    #[test]
    fn renders_fallback_box_when_sprite_missing() {
        let layout = CanvasLayout::base();
        let mut screen = GameplayScreen::new(&layout);
        // Assets never loaded.
        let mut surface = RecordingSurface::new(800.0, 400.0);
        screen.render(&mut surface);

        assert!(surface.images().is_empty());
        let body_fill = surface.ops.iter().any(|op| {
            matches!(op, DrawOp::Fill(rect, color)
                if *color == PLAYER_FALLBACK && rect.w == screen.body.w)
        });
        assert!(body_fill);
    }

    #[test]
    fn renders_sprite_frame_when_loaded() {
        let layout = CanvasLayout::base();
        let mut screen = GameplayScreen::new(&layout);
        screen.player_loaded = true;
        screen.background_loaded = true;

        let mut surface = RecordingSurface::new(800.0, 400.0);
        screen.render(&mut surface);

        let images = surface.images();
        assert!(images.contains(&PLAYER_IMAGE));
        assert!(images.contains(&BACKGROUND_IMAGE));

        let player_src_ok = surface.ops.iter().any(|op| {
            matches!(op, DrawOp::Image(id, src, _)
                if id == PLAYER_IMAGE && src.w == 32.0 && src.h == 32.0)
        });
        assert!(player_src_ok);
    }

    #[test]
    fn debug_readout_reports_position_and_grounding() {
        let layout = CanvasLayout::base();
        let mut screen = GameplayScreen::new(&layout);
        let mut surface = RecordingSurface::new(800.0, 400.0);
        screen.render(&mut surface);

        let texts = surface.texts();
        assert!(texts.iter().any(|t| t.starts_with("pos: (")));
        assert!(texts.iter().any(|t| t.starts_with("vel: (")));
        assert!(texts.contains(&"grounded: true"));
    }
}
