//=========================================================================
// Quit Signal
//=========================================================================
//
// One-way latch shared between the frame loop, the input service and the
// scenes that can terminate the application.
//
// The latch only ever goes false → true. The frame loop reads it at the
// top of every iteration, so a request made mid-frame lets the current
// frame finish and prevents the next one from starting.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

use log::info;

//=== QuitSignal ==========================================================

/// Shared one-way quit latch.
///
/// Cloning produces another handle to the same latch. Requesting quit more
/// than once has the same effect as requesting it once.
#[derive(Debug, Clone, Default)]
pub struct QuitSignal {
    requested: Rc<Cell<bool>>,
}

impl QuitSignal {
    /// Creates a new, unset latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the latch.
    pub fn request(&self) {
        if !self.requested.replace(true) {
            info!("Quit requested");
        }
    }

    /// Returns `true` once [`request`](Self::request) has been called on any
    /// handle of this latch.
    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        assert!(!QuitSignal::new().is_requested());
    }

    #[test]
    fn clones_share_the_latch() {
        let signal = QuitSignal::new();
        let scene_handle = signal.clone();

        scene_handle.request();

        assert!(signal.is_requested());
    }

    #[test]
    fn repeated_requests_are_idempotent() {
        let signal = QuitSignal::new();
        signal.request();
        signal.request();
        signal.clone().request();

        assert!(signal.is_requested());
    }
}
