//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use flappy_runtime::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application
pub use crate::app::{Application, ApplicationBuilder, ApplicationError};

// Lifecycle
pub use crate::core::subsystem::{Services, StartupError, Subsystem, SubsystemRegistry};
pub use crate::core::{GameTimer, QuitSignal};

// Input system
pub use crate::core::input::{InputEvent, KeyCode, MouseButton, WindowEventKind};

// Scene system
pub use crate::core::scene::{Scene, SceneError, SceneId, SceneMachine, SceneSwitch};

// Entities and resources
pub use crate::core::entity::Entity;
pub use crate::core::resource::{FontArgs, Ruid, Sound, TtFont};

// Platform
pub use crate::platform::{HeadlessBackend, PlatformBackend, WindowSettings};
