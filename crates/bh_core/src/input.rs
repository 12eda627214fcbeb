//! Shared input state for all screens.
//!
//! One `InputState` is owned by the driver and injected into whichever screen
//! is active. The held-key map is level-triggered and deliberately survives
//! screen transitions: a key that is down while the state machine switches
//! screens is still "held" in the new screen's view. The pause trigger relies
//! on this (holding Escape across a Pause round-trip re-pauses immediately).
//!
//! Clicks use a single pending slot instead of a set: the host delivers at
//! most one click per frame to the active screen, which consumes it with
//! `take_click`. A click nobody consumes is dropped at `end_frame` so it can
//! never fire on a screen that was not active when the button went down.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    A,
    D,
    W,
    Space,
    Escape,
}

pub struct InputState {
    held: HashSet<Key>,
    pending_click: Option<(f64, f64)>,
    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            pending_click: None,
            mouse_position: (0.0, 0.0),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Record a primary-button click at the given window position.
    /// A second click in the same frame overwrites the first.
    pub fn press_click(&mut self, x: f64, y: f64) {
        self.pending_click = Some((x, y));
    }

    /// Consume the pending click, if any. Window coordinates.
    pub fn take_click(&mut self) -> Option<(f64, f64)> {
        self.pending_click.take()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop the unconsumed click, if any. The driver calls this only after at
    /// least one fixed step consumed the frame's input, so a click landing on
    /// a zero-step frame is not silently lost.
    pub fn end_frame(&mut self) {
        self.pending_click = None;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
