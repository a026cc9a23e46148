//=========================================================================
// Platform Subsystem
//
// Bridges the OS window (or a headless stand-in) with the input service
// through a crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread (single):
//  ┌──────────────────────────┐
//  │  PlatformService::pump() │  waits up to the frame budget
//  │   ↓                      │
//  │  PlatformBackend         │
//  │   ├─ WinitBackend        │  pump_app_events(ZERO) → InputProcessor
//  │   │                      │                        → InputBuffer
//  │   └─ HeadlessBackend     │  scripted batch per pump
//  │   ↓                      │
//  │  Channel ────────────────┼──→ InputService::tick()
//  └──────────────────────────┘     PlatformEvent
//
//  Frame Boundary: one pump per frame
//    → Buffered input sent as one `PlatformEvent::Inputs` batch
//    → Window events sent as they arrive, after the input before them
//    → Empty batches are not sent
// ```
//
// Key Design Decisions:
// - **Budgeted pump**: the frame loop owns control flow; the backend is
//   pumped once per frame and may block for at most the wait it is given
// - **Close is just an event**: the backend never exits on its own, the
//   window close action on the input service sets the quit latch
// - **Graceful channel disconnect**: a dropped receiver is logged and the
//   events are discarded
//
//=========================================================================

//=== Submodules ==========================================================

mod headless;
mod input_buffer;
mod input_processor;
mod winit_backend;

//=== Public API ==========================================================

pub use headless::HeadlessBackend;
pub use winit_backend::WinitBackend;

//=== External Crates =====================================================

use std::time::Duration;

use crossbeam_channel::Sender;
use log::*;

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::subsystem::{Subsystem, SubsystemError};

//=== WindowSettings ======================================================

/// Main window parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSettings {
    pub title: String,
    /// Logical width.
    pub width: u32,
    /// Logical height.
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "FlappyBird".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

//=== PlatformBackend =====================================================

/// Source of window and input events.
///
/// Everything runs on the thread that owns the [`PlatformService`].
pub trait PlatformBackend {
    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Opens the window (if any) and keeps `sender` for later pumps.
    fn startup(
        &mut self,
        window: &WindowSettings,
        sender: Sender<PlatformEvent>,
    ) -> Result<(), PlatformError>;

    /// Processes OS events, returning once `wait` has elapsed.
    ///
    /// A zero `wait` processes whatever is pending and returns at once.
    fn pump(&mut self, wait: Duration);

    /// Closes the window and drops the sender.
    fn shutdown(&mut self);
}

//=== PlatformService =====================================================

/// Subsystem owning the platform backend.
pub struct PlatformService {
    backend: Box<dyn PlatformBackend>,
    window: WindowSettings,
    sender: Sender<PlatformEvent>,
    running: bool,
}

impl PlatformService {
    pub(crate) fn new(
        backend: Box<dyn PlatformBackend>,
        window: WindowSettings,
        sender: Sender<PlatformEvent>,
    ) -> Self {
        Self {
            backend,
            window,
            sender,
            running: false,
        }
    }

    /// Pumps the backend once, blocking for up to `wait`. Does nothing
    /// unless running.
    pub(crate) fn pump(&mut self, wait: Duration) {
        if self.running {
            self.backend.pump(wait);
        }
    }

    /// Another handle to the channel feeding the input service.
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.sender.clone()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn window_settings(&self) -> &WindowSettings {
        &self.window
    }
}

impl Subsystem for PlatformService {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        info!(
            target: "platform",
            "Starting {} backend ({} {}x{})",
            self.backend.name(),
            self.window.title,
            self.window.width,
            self.window.height
        );
        self.backend.startup(&self.window, self.sender.clone())?;
        self.running = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.backend.shutdown();
        self.running = false;
        info!(target: "platform", "Platform backend {} stopped", self.backend.name());
    }
}

//--- Shared Helpers ------------------------------------------------------

/// Sends `event`, logging instead of failing when the receiver is gone.
pub(crate) fn send_event(sender: &Sender<PlatformEvent>, event: PlatformEvent) {
    if let Err(err) = sender.send(event) {
        warn!(
            target: "platform",
            "Channel disconnected, dropping {:?}",
            err.into_inner()
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::WindowEventKind;
    use crossbeam_channel::unbounded;

    fn service(backend: HeadlessBackend) -> (PlatformService, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        (
            PlatformService::new(Box::new(backend), WindowSettings::default(), tx),
            rx,
        )
    }

    #[test]
    fn pump_before_startup_is_noop() {
        let script = vec![vec![PlatformEvent::Window(WindowEventKind::Close)]];
        let (mut platform, rx) = service(HeadlessBackend::with_script(script));

        platform.pump(Duration::ZERO);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn started_service_forwards_backend_events() {
        let script = vec![vec![PlatformEvent::Window(WindowEventKind::Close)]];
        let (mut platform, rx) = service(HeadlessBackend::with_script(script));

        platform.startup().unwrap();
        platform.pump(Duration::ZERO);

        assert_eq!(rx.try_recv(), Ok(PlatformEvent::Window(WindowEventKind::Close)));
        assert_eq!(platform.backend_name(), "headless");
    }

    #[test]
    fn send_survives_disconnect() {
        let (tx, rx) = unbounded();
        drop(rx);
        send_event(&tx, PlatformEvent::Window(WindowEventKind::Resize));
    }
}
