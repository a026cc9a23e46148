//=========================================================================
// Core Services
//
// Engine services and the machinery that drives them.
//
// Responsibilities:
// - Define the subsystem lifecycle and the registry that orders it
// - Own the seven services (platform, input, audio, render, resource,
//   entity, config) through `Services`
// - Provide the scene state machine, the frame timer and the quit latch
//
// Notes:
// Everything here runs on the main thread. The only cross-boundary
// traffic is the platform event queue drained by the input service.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod audio;
pub mod config;
pub mod crash;
pub mod entity;
pub mod input;
pub mod platform_bridge;
pub mod quit;
pub mod render;
pub mod resource;
pub mod scene;
pub mod subsystem;
pub mod timer;

//=== Public API ==========================================================

pub use quit::QuitSignal;
pub use subsystem::{Services, StartupError, Subsystem, SubsystemRegistry};
pub use timer::GameTimer;
