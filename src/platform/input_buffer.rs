//=========================================================================
// Input Buffer
//
// Collects raw input events between two pumps of the platform backend
// into two categories: discrete and continuous.
//
// Responsibilities:
// - Keep discrete inputs (key/button edges) in arrival order
// - Drop immediate repeats of a discrete input (OS key repeat)
// - Coalesce continuous inputs (cursor motion, last value wins)
// - Hand one batch per pump to the backend via `drain()`
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashSet;

//=== Internal Modules ====================================================

use crate::core::input::InputEvent;

//=== InputBuffer =========================================================

/// Transient event store for one platform pump.
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: HashSet<InputEvent>,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 32;
        const CONTINUOUS_BASE: usize = 4;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: HashSet::with_capacity(CONTINUOUS_BASE),
        }
    }

    //--- Event Handling ---------------------------------------------------

    /// Routes `event` to the discrete or continuous store.
    pub(crate) fn push(&mut self, event: InputEvent) {
        if event.is_continuous() {
            self.continuous.replace(event);
        } else if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this pump's events, discrete first. `None` when empty.
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        let mut events = std::mem::take(&mut self.discrete);
        events.extend(self.continuous.drain());
        Some(events)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    #[test]
    fn repeated_discrete_events_are_dropped() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::Space));
        buffer.push(InputEvent::KeyDown(KeyCode::Space));
        buffer.push(InputEvent::KeyUp(KeyCode::Space));
        buffer.push(InputEvent::KeyDown(KeyCode::Space));

        assert_eq!(buffer.drain().map(|events| events.len()), Some(3));
    }

    #[test]
    fn cursor_motion_keeps_latest_position() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(10.0, 10.0));
        buffer.push(mouse_move(20.0, 30.0));

        let events = buffer.drain().unwrap();
        assert_eq!(events.len(), 1);
        match events[0] {
            InputEvent::MouseMoved { x, y } => assert_eq!((x, y), (20.0, 30.0)),
            other => panic!("Expected MouseMoved, found {:?}", other),
        }
    }

    #[test]
    fn discrete_events_come_first() {
        let mut buffer = InputBuffer::new();
        buffer.push(mouse_move(1.0, 2.0));
        buffer.push(InputEvent::KeyDown(KeyCode::Enter));

        let events = buffer.drain().unwrap();
        assert_eq!(events[0], InputEvent::KeyDown(KeyCode::Enter));
        assert!(events[1].is_continuous());
    }

    #[test]
    fn drain_empties_buffer() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push(InputEvent::KeyDown(KeyCode::KeyM));
        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }
}
