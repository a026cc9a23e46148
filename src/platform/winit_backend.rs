//=========================================================================
// Winit Backend
//=========================================================================
//
// Desktop window driven by a pumped Winit event loop.
//
// Lifecycle:
//   startup  → EventLoop::new() → first pump → resumed() creates window
//   pump     → pump_app_events(remaining wait)* → window_event()* → flush input
//   shutdown → window dropped, event loop dropped
//
// Winit allows one event loop per process; the backend is created once by
// the application and never restarted.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Dependencies ===============================================

use super::input_buffer::InputBuffer;
use super::input_processor::{InputProcessor, Translated};
use super::{send_event, PlatformBackend, WindowSettings};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};

//=== WinitBackend ========================================================

/// Platform backend with an OS window.
#[derive(Default)]
pub struct WinitBackend {
    event_loop: Option<EventLoop<()>>,
    handler: Option<WindowHandler>,
}

impl WinitBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlatformBackend for WinitBackend {
    fn name(&self) -> &'static str {
        "winit"
    }

    fn startup(
        &mut self,
        window: &WindowSettings,
        sender: Sender<PlatformEvent>,
    ) -> Result<(), PlatformError> {
        debug!(target: "platform", "Creating Winit event loop");
        let event_loop = EventLoop::new()?;

        self.event_loop = Some(event_loop);
        self.handler = Some(WindowHandler::new(window.clone(), sender));

        // The first pump delivers `resumed`, which creates the window.
        self.pump(Duration::ZERO);

        let creation_error = self
            .handler
            .as_mut()
            .and_then(|handler| handler.creation_error.take());

        match creation_error {
            Some(reason) => {
                self.shutdown();
                Err(PlatformError::WindowCreation(reason))
            }
            None => Ok(()),
        }
    }

    fn pump(&mut self, wait: Duration) {
        let (Some(event_loop), Some(handler)) = (self.event_loop.as_mut(), self.handler.as_mut())
        else {
            return;
        };

        // pump_app_events returns as soon as events arrive, so keep pumping
        // until the whole wait is used up.
        let deadline = Instant::now() + wait;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(timeout), handler) {
                if !handler.exited {
                    warn!(target: "platform", "Winit event loop exited with code {}", code);
                    handler.exited = true;
                }
                break;
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        handler.flush_input();
    }

    fn shutdown(&mut self) {
        if let Some(mut handler) = self.handler.take() {
            handler.flush_input();
            if handler.window.take().is_some() {
                info!(target: "platform", "Window closed");
            }
        }
        self.event_loop = None;
    }
}

//=== WindowHandler =======================================================

/// Winit application handler: owns the window and the input buffer.
struct WindowHandler {
    settings: WindowSettings,
    window: Option<Window>,
    buffer: InputBuffer,
    sender: Sender<PlatformEvent>,
    creation_error: Option<String>,
    exited: bool,
}

impl WindowHandler {
    fn new(settings: WindowSettings, sender: Sender<PlatformEvent>) -> Self {
        Self {
            settings,
            window: None,
            buffer: InputBuffer::new(),
            sender,
            creation_error: None,
            exited: false,
        }
    }

    /// Sends the buffered input as one batch.
    fn flush_input(&mut self) {
        if let Some(events) = self.buffer.drain() {
            trace!(target: "platform", "Flushing {} input events", events.len());
            send_event(&self.sender, PlatformEvent::Inputs(events));
        }
    }
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(window);
            }
            Err(err) => {
                error!(target: "platform", "Window creation failed: {}", err);
                self.creation_error = Some(err.to_string());
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match InputProcessor::translate(&event) {
            Some(Translated::Input(input)) => self.buffer.push(input),
            Some(Translated::Window(kind)) => {
                debug!(target: "platform", "Window event {:?}", kind);
                // Input that happened before the window event is delivered first.
                self.flush_input();
                send_event(&self.sender, PlatformEvent::Window(kind));
            }
            None => {}
        }
    }
}
