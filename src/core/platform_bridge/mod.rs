//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform backends (winit, headless) with the input service.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side draining of the platform queue
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::EventCollector;
pub use interface::{PlatformError, PlatformEvent};
