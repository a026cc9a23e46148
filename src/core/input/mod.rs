//=========================================================================
// Input Service
//
// High-level interface for input handling within the engine.
//
// Responsibilities:
// - Drain the platform queue once per frame (`tick`)
// - Fold input events into per-frame key/button/mouse state
// - Dispatch window events to registered window event actions
// - Expose read-only queries to scenes
//
// Frame lifecycle:
//   clear deltas → collect platform events → process inputs
//                → dispatch window actions → scenes query
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, MouseButton, WindowEventKind};

//=== External Crates =====================================================

use crossbeam_channel::Receiver;
use log::{debug, trace};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::core::subsystem::{Subsystem, SubsystemError};
use state_tracker::StateTracker;

//=== WindowEventAction ===================================================

struct WindowEventAction {
    kind: WindowEventKind,
    action: Box<dyn FnMut()>,
    consume: bool,
}

//=== InputService ========================================================

/// Per-frame input state and window event dispatch.
pub struct InputService {
    collector: EventCollector,
    state: StateTracker,
    window_actions: Vec<WindowEventAction>,
    window_events: Vec<WindowEventKind>,
    running: bool,
}

impl InputService {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            collector: EventCollector::new(receiver),
            state: StateTracker::new(),
            window_actions: Vec::new(),
            window_events: Vec::new(),
            running: false,
        }
    }

    //--- Window Event Actions ---------------------------------------------

    /// Binds `action` to a window event.
    ///
    /// Actions for the same event run in registration order. An action
    /// registered with `consume = true` swallows the event: later actions
    /// for it do not run and scenes will not see it in
    /// [`window_events`](Self::window_events).
    pub fn add_window_event_action<F>(&mut self, kind: WindowEventKind, action: F, consume: bool)
    where
        F: FnMut() + 'static,
    {
        debug!(target: "input", "Window action bound to {:?} (consume: {})", kind, consume);
        self.window_actions.push(WindowEventAction {
            kind,
            action: Box::new(action),
            consume,
        });
    }

    //--- Frame Processing -------------------------------------------------

    /// Polls the platform queue and dispatches this frame's input.
    ///
    /// Window event actions run synchronously from here.
    pub fn tick(&mut self) {
        self.state.clear();
        self.window_events.clear();

        if !self.running {
            return;
        }

        let collected = self.collector.collect_frame();
        if collected > 0 {
            trace!(target: "input", "Dispatching {} platform events", collected);
        }

        for event in self.collector.take_events() {
            match event {
                PlatformEvent::Inputs(batch) => self.state.process_events(&batch),
                PlatformEvent::Window(kind) => self.dispatch_window_event(kind),
            }
        }
    }

    fn dispatch_window_event(&mut self, kind: WindowEventKind) {
        let mut consumed = false;

        for binding in self.window_actions.iter_mut().filter(|b| b.kind == kind) {
            (binding.action)();
            if binding.consume {
                consumed = true;
                break;
            }
        }

        if !consumed {
            self.window_events.push(kind);
        }
    }

    //--- Query Methods ----------------------------------------------------

    /// `true` only on the frame the key went down.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.state.is_key_pressed(key)
    }

    /// `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.state.is_key_down(key)
    }

    /// `true` only on the frame the key went up.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.state.is_key_released(key)
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.state.is_button_pressed(button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.state.is_button_down(button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.state.is_button_released(button)
    }

    /// Cursor position in window pixels.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.state.mouse_position()
    }

    /// Window events of this frame that no action consumed.
    pub fn window_events(&self) -> &[WindowEventKind] {
        &self.window_events
    }
}

//=== Subsystem ===========================================================

impl Subsystem for InputService {
    fn name(&self) -> &'static str {
        "input"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        let stale = self.collector.discard_pending();
        if stale > 0 {
            debug!(target: "input", "Discarded {} events queued before startup", stale);
        }
        self.running = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.running = false;
        self.window_actions.clear();
        self.window_events.clear();
        self.state.reset();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
