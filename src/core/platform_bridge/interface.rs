//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract between platform backends and the input service.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, WindowEventKind};

//=== PlatformEvent =======================================================

/// Events sent from the platform backend to the input service.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Input gathered during one platform pump, in arrival order.
    Inputs(Vec<InputEvent>),

    /// Window-level notification (close, resize, focus).
    Window(WindowEventKind),
}

//=== PlatformError =======================================================

/// Platform initialization errors.
///
/// These are fatal: without an event loop and a window the game cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue, no display, ...).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[from] winit::error::EventLoopError),

    /// The OS refused to create the window.
    #[error("window creation failed: {0}")]
    WindowCreation(String),
}
