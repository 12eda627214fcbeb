//! Top-level application state machine.
//!
//! Three states, transitions are unrestricted: any state may be set from any
//! other, and setting the current state again is a no-op at the machine level
//! (the observer still fires). Screens are kept alive across transitions so a
//! paused run resumes exactly where it stopped.

/// Which screen owns update and render this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Menu,
    Gameplay,
    Pause,
}

impl GameState {
    pub fn name(self) -> &'static str {
        match self {
            GameState::Menu => "menu",
            GameState::Gameplay => "gameplay",
            GameState::Pause => "pause",
        }
    }
}

/// Holds the current state and a single change observer.
///
/// Transitions apply synchronously: by the time `set_state` returns, the
/// observer has already run and `current` reports the new state. Registering
/// a second observer replaces the first.
pub struct StateManager {
    current: GameState,
    observer: Option<Box<dyn FnMut(GameState)>>,
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StateManager {
    pub fn new() -> Self {
        Self {
            current: GameState::Menu,
            observer: None,
        }
    }

    pub fn current(&self) -> GameState {
        self.current
    }

    pub fn set_state(&mut self, next: GameState) {
        self.current = next;
        if let Some(observer) = self.observer.as_mut() {
            observer(next);
        }
    }

    pub fn on_change(&mut self, observer: impl FnMut(GameState) + 'static) {
        self.observer = Some(Box::new(observer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn starts_in_menu() {
        let states = StateManager::new();
        assert_eq!(states.current(), GameState::Menu);
    }

    #[test]
    fn set_state_is_immediate() {
        let mut states = StateManager::new();
        states.set_state(GameState::Gameplay);
        assert_eq!(states.current(), GameState::Gameplay);
        states.set_state(GameState::Pause);
        assert_eq!(states.current(), GameState::Pause);
    }

    #[test]
    fn observer_runs_before_set_state_returns() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut states = StateManager::new();
        states.on_change(move |s| sink.borrow_mut().push(s));

        states.set_state(GameState::Gameplay);
        states.set_state(GameState::Pause);
        states.set_state(GameState::Gameplay);

        assert_eq!(
            *seen.borrow(),
            vec![GameState::Gameplay, GameState::Pause, GameState::Gameplay]
        );
    }

    #[test]
    fn second_observer_replaces_first() {
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let mut states = StateManager::new();

        let sink = Rc::clone(&first);
        states.on_change(move |_| *sink.borrow_mut() += 1);
        states.set_state(GameState::Gameplay);

        let sink = Rc::clone(&second);
        states.on_change(move |_| *sink.borrow_mut() += 1);
        states.set_state(GameState::Pause);

        assert_eq!(*first.borrow(), 1);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn setting_same_state_still_notifies() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let mut states = StateManager::new();
        states.on_change(move |_| *sink.borrow_mut() += 1);

        states.set_state(GameState::Menu);
        states.set_state(GameState::Menu);

        assert_eq!(*count.borrow(), 2);
    }
}
