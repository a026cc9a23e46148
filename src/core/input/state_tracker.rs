//=========================================================================
// State Tracker
//=========================================================================
//
// Low-level input state tracking with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: clear() → process_events() → query
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Tracks persistent state (keys held) and per-frame deltas (keys pressed/released).
#[derive(Debug, Default)]
pub(crate) struct StateTracker {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),

    //--- Frame Deltas (reset each frame via clear()) --------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
}

impl StateTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released flags).
    pub(crate) fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    /// Drops all state, held keys included.
    pub(crate) fn reset(&mut self) {
        self.clear();
        self.keys_down.clear();
        self.buttons_down.clear();
        self.mouse_position = (0.0, 0.0);
    }

    pub(crate) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => {
                // Only a transition counts as a press (ignores OS key repeat)
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp(key) => {
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown(button) => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp(button) => {
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }
        }
    }

    //--- Queries ----------------------------------------------------------

    pub(crate) fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub(crate) fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub(crate) fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    pub(crate) fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub(crate) fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub(crate) fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub(crate) fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        // Frame 1: Key down
        tracker.clear();
        tracker.process_events(&[InputEvent::KeyDown(KeyCode::KeyA)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        // Frame 2: Still held
        tracker.clear();
        tracker.process_events(&[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        // Frame 3: Released
        tracker.clear();
        tracker.process_events(&[InputEvent::KeyUp(KeyCode::KeyA)]);
        assert!(!tracker.is_key_down(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[InputEvent::KeyDown(KeyCode::Space)]);

        tracker.clear();
        tracker.process_events(&[InputEvent::KeyDown(KeyCode::Space)]);

        assert!(!tracker.is_key_pressed(KeyCode::Space));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[InputEvent::KeyUp(KeyCode::Enter)]);
        assert!(!tracker.is_key_released(KeyCode::Enter));
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn mouse_button_press_and_release() {
        let mut tracker = StateTracker::new();

        tracker.process_events(&[InputEvent::MouseButtonDown(MouseButton::Left)]);
        assert!(tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));

        tracker.clear();
        tracker.process_events(&[InputEvent::MouseButtonUp(MouseButton::Left)]);
        assert!(!tracker.is_button_down(MouseButton::Left));
        assert!(tracker.is_button_released(MouseButton::Left));
    }

    #[test]
    fn mouse_position_tracks_last_move() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[
            InputEvent::MouseMoved { x: 10.0, y: 20.0 },
            InputEvent::MouseMoved { x: 30.0, y: 40.0 },
        ]);
        assert_eq!(tracker.mouse_position(), (30.0, 40.0));
    }

    #[test]
    fn reset_forgets_held_keys() {
        let mut tracker = StateTracker::new();
        tracker.process_events(&[InputEvent::KeyDown(KeyCode::KeyW)]);
        tracker.reset();
        assert!(!tracker.is_key_down(KeyCode::KeyW));
    }
}
