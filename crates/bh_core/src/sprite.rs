//! Sprite sheets with per-sprite animation clocks.
//!
//! A sprite is a fixed-stride horizontal sheet: `total_frames` cells of
//! `frame_width` x `frame_height` pixels. Each sprite advances its own frame
//! index on a wall-clock budget (`frame_time_ms`), fed the current timestamp
//! once per tick. The clock is integer-millisecond on purpose: it stays
//! deterministic under test and never drifts against the physics step rate,
//! which it is intentionally not synchronized with.

#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub total_frames: u32,
    pub current_frame: u32,
    pub frame_time_ms: u64,
    last_frame_at: u64,
}

impl Sprite {
    pub fn new(
        id: &str,
        frame_width: u32,
        frame_height: u32,
        total_frames: u32,
        frame_time_ms: u64,
    ) -> Self {
        Self {
            id: id.to_string(),
            frame_width,
            frame_height,
            total_frames: total_frames.max(1),
            current_frame: 0,
            frame_time_ms,
            last_frame_at: 0,
        }
    }

    /// Advance the frame index if the budget has elapsed since the last
    /// advancement. Single-frame sprites never advance.
    pub fn update(&mut self, now_ms: u64) {
        if self.total_frames <= 1 {
            return;
        }
        if now_ms.saturating_sub(self.last_frame_at) >= self.frame_time_ms {
            self.current_frame = (self.current_frame + 1) % self.total_frames;
            self.last_frame_at = now_ms;
        }
    }

    /// Horizontal pixel offset of the current frame within the sheet.
    pub fn frame_offset_x(&self) -> f32 {
        (self.current_frame * self.frame_width) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_holds_until_budget_elapses() {
        let mut sprite = Sprite::new("player", 32, 32, 4, 150);
        sprite.update(100);
        assert_eq!(sprite.current_frame, 0);
        sprite.update(149);
        assert_eq!(sprite.current_frame, 0);
    }

    #[test]
    fn frame_advances_on_budget() {
        let mut sprite = Sprite::new("player", 32, 32, 4, 150);
        sprite.update(150);
        assert_eq!(sprite.current_frame, 1);
        assert_eq!(sprite.frame_offset_x(), 32.0);
    }

    #[test]
    fn frames_wrap_around() {
        let mut sprite = Sprite::new("player", 32, 32, 4, 100);
        for t in [100, 200, 300, 400] {
            sprite.update(t);
        }
        assert_eq!(sprite.current_frame, 0);
    }

    #[test]
    fn budget_counts_from_last_advance_not_call() {
        let mut sprite = Sprite::new("player", 32, 32, 4, 100);
        // Many small ticks; only every full 100ms since the last advance flips.
        for t in (0..=250).step_by(10) {
            sprite.update(t);
        }
        assert_eq!(sprite.current_frame, 2);
    }

    #[test]
    fn single_frame_sprite_never_advances() {
        let mut sprite = Sprite::new("background", 64, 64, 1, 100);
        sprite.update(10_000);
        assert_eq!(sprite.current_frame, 0);
        assert_eq!(sprite.frame_offset_x(), 0.0);
    }

    #[test]
    fn zero_frames_clamped_to_one() {
        let sprite = Sprite::new("broken", 32, 32, 0, 100);
        assert_eq!(sprite.total_frames, 1);
    }
}
