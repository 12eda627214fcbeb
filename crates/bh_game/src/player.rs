//! Player body and its fixed-step physics.
//!
//! All tuning values are in canvas units per tick at the 800x400 base canvas
//! and scale with the layout, so the arc of a jump looks the same in a small
//! window and a stretched one.

use bh_core::layout::CanvasLayout;

pub const BASE_WIDTH: f32 = 32.0;
pub const BASE_HEIGHT: f32 = 32.0;
pub const BASE_SPEED: f32 = 5.0;
pub const BASE_JUMP_POWER: f32 = 12.0;
pub const BASE_GRAVITY: f32 = 0.5;
pub const BASE_GROUND_OFFSET: f32 = 40.0;

/// Movement intent for one tick, already resolved from raw key state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

#[derive(Debug, Clone)]
pub struct PlayerBody {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,

    speed: f32,
    jump_power: f32,
    gravity: f32,
}

/// Top of the ground band for a given layout.
pub fn ground_y(layout: &CanvasLayout) -> f32 {
    layout.height - BASE_GROUND_OFFSET * layout.scale_y
}

impl PlayerBody {
    /// Spawn standing on the ground near the left edge.
    pub fn new(layout: &CanvasLayout) -> Self {
        let w = BASE_WIDTH * layout.scale_x;
        let h = BASE_HEIGHT * layout.scale_y;
        Self {
            x: 50.0 * layout.scale_x,
            y: ground_y(layout) - h,
            w,
            h,
            vx: 0.0,
            vy: 0.0,
            on_ground: true,
            speed: BASE_SPEED * layout.scale_x,
            jump_power: BASE_JUMP_POWER * layout.scale_y,
            gravity: BASE_GRAVITY * layout.scale_y,
        }
    }

    /// Advance one tick. Order matters: intent, jump, gravity, integration,
    /// then clamps; the ground clamp is the only thing that sets `on_ground`.
    pub fn step(&mut self, input: TickInput, surface_width: f32, ground_y: f32) {
        if input.left {
            self.vx = -self.speed;
        } else if input.right {
            self.vx = self.speed;
        } else {
            self.vx *= 0.8;
        }

        // Held jump, not edge-triggered: a key held across a landing fires
        // the next hop on the first grounded tick.
        if input.jump && self.on_ground {
            self.vy = -self.jump_power;
            self.on_ground = false;
        }

        if !self.on_ground {
            self.vy += self.gravity;
        }

        self.x += self.vx;
        self.y += self.vy;

        if self.y + self.h >= ground_y {
            self.y = ground_y - self.h;
            self.vy = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        if self.x < 0.0 {
            self.x = 0.0;
            self.vx = 0.0;
        } else if self.x + self.w > surface_width {
            self.x = surface_width - self.w;
            self.vx = 0.0;
        }
    }

    /// Rescale the body when the canvas layout changes. Position carries over
    /// proportionally so the player stays at the same spot on screen.
    pub fn apply_layout(&mut self, old: &CanvasLayout, new: &CanvasLayout) {
        let rx = new.width / old.width;
        let ry = new.height / old.height;
        self.x *= rx;
        self.y *= ry;
        self.vx *= rx;
        self.vy *= ry;
        self.w = BASE_WIDTH * new.scale_x;
        self.h = BASE_HEIGHT * new.scale_y;
        self.speed = BASE_SPEED * new.scale_x;
        self.jump_power = BASE_JUMP_POWER * new.scale_y;
        self.gravity = BASE_GRAVITY * new.scale_y;
    }
}
