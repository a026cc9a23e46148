//=========================================================================
// Flappy Runtime: Library Root
//
// This crate defines the run-time core of the game.
//
// Responsibilities:
// - Expose the application facade (`ApplicationBuilder`, `Application`)
// - Expose the services, the subsystem registry and the scene machine
//   for scenes and tools built on top of them
// - Keep winit integration behind the `PlatformBackend` seam
//
// Typical usage:
// ```no_run
// use flappy_runtime::ApplicationBuilder;
//
// fn main() -> Result<(), flappy_runtime::ApplicationError> {
//     let mut app = ApplicationBuilder::new().build()?;
//     app.startup()?;
//     app.run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the services, their lifecycle and the scene machine.
// `scenes` contains the five game scenes and their wiring.
// `platform` contains the window backends (winit, headless); it is public
// so tests and tools can drive the game without a window.
//
pub mod core;
pub mod platform;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `app` defines the application entry point and the frame loop.
//
mod app;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the application facade so users can simply
// `use flappy_runtime::ApplicationBuilder;`.
//
pub use app::{Application, ApplicationBuilder, ApplicationError};
