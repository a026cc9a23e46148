//=========================================================================
// Menu
//=========================================================================
//
// Vertical text menu shared by the start and rank scenes.
//
// Up/Down move the cursor (wrapping), Enter/Space activate the item under
// it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{draw_text, FONT_32, HIGHLIGHT, WHITE};
use crate::core::input::{InputService, KeyCode};
use crate::core::subsystem::Services;

//=== Menu ================================================================

pub(crate) struct Menu<T: Copy> {
    items: Vec<(&'static str, T)>,
    cursor: usize,
}

impl<T: Copy> Menu<T> {
    pub(crate) fn new(items: Vec<(&'static str, T)>) -> Self {
        Self { items, cursor: 0 }
    }

    pub(crate) fn reset(&mut self) {
        self.cursor = 0;
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applies this frame's input. Returns the activated item, if any.
    pub(crate) fn update(&mut self, input: &InputService) -> Option<T> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }

        if input.is_key_pressed(KeyCode::ArrowUp) {
            self.cursor = (self.cursor + len - 1) % len;
        }
        if input.is_key_pressed(KeyCode::ArrowDown) {
            self.cursor = (self.cursor + 1) % len;
        }

        let activated = input.is_key_pressed(KeyCode::Enter) || input.is_key_pressed(KeyCode::Space);
        activated.then(|| self.items[self.cursor].1)
    }

    /// Queues the items, one line each, starting at `top`.
    pub(crate) fn draw(&self, services: &mut Services, x: f32, top: f32) {
        const LINE_HEIGHT: f32 = 50.0;

        for (index, (label, _)) in self.items.iter().enumerate() {
            let color = if index == self.cursor { HIGHLIGHT } else { WHITE };
            let y = top + index as f32 * LINE_HEIGHT;
            draw_text(services, FONT_32, *label, (x, y), color);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
