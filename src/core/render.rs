//=========================================================================
// Render Service
//=========================================================================
//
// Render state and per-frame draw command list.
//
// Frame lifecycle: begin_frame() → draw()* → end_frame()
//
// The GPU backend consumes the presented command list; this service only
// owns the state toggles and the ordering of commands.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::resource::Ruid;
use crate::core::subsystem::{Subsystem, SubsystemError};

//=== RenderState =========================================================

/// Global pipeline toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub depth_test: bool,
    pub alpha_blend: bool,
    pub multisample: bool,
    /// Read by the frame loop to pace frames.
    pub vsync: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            depth_test: true,
            alpha_blend: false,
            multisample: false,
            vsync: false,
        }
    }
}

//=== DrawCommand =========================================================

/// RGBA color, components in 0.0..=1.0.
pub type Color = [f32; 4];

/// One primitive queued for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Text drawn with a font resource, anchored at its center.
    Text {
        font: Ruid,
        text: String,
        center: (f32, f32),
        color: Color,
    },

    /// Axis-aligned filled rectangle, anchored at its center.
    Rect {
        center: (f32, f32),
        size: (f32, f32),
        color: Color,
    },
}

//=== RenderService =======================================================

/// Render-state owner and command recorder.
#[derive(Debug)]
pub struct RenderService {
    state: RenderState,
    clear_color: Color,
    recording: Option<Vec<DrawCommand>>,
    presented: Vec<DrawCommand>,
    frames_presented: u64,
    running: bool,
}

impl RenderService {
    pub(crate) fn new() -> Self {
        Self {
            state: RenderState::default(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            recording: None,
            presented: Vec::new(),
            frames_presented: 0,
            running: false,
        }
    }

    //--- State Toggles ----------------------------------------------------

    pub fn set_depth_mode(&mut self, enabled: bool) {
        self.state.depth_test = enabled;
    }

    pub fn set_alpha_blend_mode(&mut self, enabled: bool) {
        self.state.alpha_blend = enabled;
    }

    pub fn set_multisample_mode(&mut self, enabled: bool) {
        self.state.multisample = enabled;
    }

    /// Syncs presentation to the frame interval. While on, the frame loop
    /// waits out the rest of each interval before starting the next frame.
    pub fn set_vsync_mode(&mut self, enabled: bool) {
        self.state.vsync = enabled;
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    //--- Frame Recording --------------------------------------------------

    /// Starts recording a frame cleared to `clear_color`.
    pub fn begin_frame(&mut self, clear_color: Color) {
        if self.recording.is_some() {
            warn!("begin_frame called twice; previous commands discarded");
        }
        self.clear_color = clear_color;
        self.recording = Some(Vec::new());
    }

    /// Records a command. Ignored outside `begin_frame`/`end_frame`.
    pub fn draw(&mut self, command: DrawCommand) {
        match self.recording.as_mut() {
            Some(commands) => commands.push(command),
            None => warn!("draw called outside of a frame"),
        }
    }

    /// Finishes the frame and hands its commands to presentation.
    pub fn end_frame(&mut self) {
        let Some(commands) = self.recording.take() else {
            warn!("end_frame called without begin_frame");
            return;
        };
        if self.running {
            self.presented = commands;
            self.frames_presented += 1;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Commands of the last presented frame.
    pub fn presented(&self) -> &[DrawCommand] {
        &self.presented
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

//=== Subsystem ===========================================================

impl Subsystem for RenderService {
    fn name(&self) -> &'static str {
        "render"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.state = RenderState::default();
        self.running = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        info!("Render service stopping after {} frames", self.frames_presented);
        self.recording = None;
        self.presented.clear();
        self.running = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
