//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle and link-based scene switching.
//
// Architecture:
//   SceneMachine
//     ├─ scenes: HashMap<SceneId, Box<dyn Scene>>
//     └─ current: SceneId
//
// Flow (once per frame):
//   tick() → Scene::tick()
//   process_transition() → is_detect_switch()? → exit → link() → enter
//
// Scenes never hold references to each other. A link is a `SceneId`
// resolved by the machine at transition time.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::subsystem::Services;

//=== Module Declarations =================================================

mod machine;

//=== Public API ==========================================================

pub use machine::{SceneMachine, SceneMachineBuilder};

//=== SceneId =============================================================

/// Identity of every scene the game knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneId {
    Start,
    Setting,
    Ready,
    Play,
    Rank,
}

impl SceneId {
    pub const ALL: [SceneId; 5] = [
        SceneId::Start,
        SceneId::Setting,
        SceneId::Ready,
        SceneId::Play,
        SceneId::Rank,
    ];
}

//=== Errors ==============================================================

/// Scene graph and transition invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("no initial scene was set")]
    NoInitialScene,

    #[error("scene {0:?} is not registered")]
    UnregisteredScene(SceneId),

    #[error("scene {from:?} links to unregistered scene {to:?}")]
    DanglingLink { from: SceneId, to: SceneId },

    #[error("scene {0:?} requested a switch without a link")]
    MissingLink(SceneId),

    #[error("scene {0:?} still requests a switch after enter")]
    SwitchNotCleared(SceneId),
}

//=== Scene Trait =========================================================

/// One state of the game flow.
///
/// The machine calls `enter` exactly once when the scene becomes current,
/// `tick` once per frame while it is current and `exit` exactly once
/// before the next scene is entered. `enter` must clear the switch
/// request; a scene still flagged after `enter` aborts the run.
pub trait Scene {
    fn enter(&mut self, services: &mut Services);

    fn tick(&mut self, services: &mut Services, delta_seconds: f32);

    fn exit(&mut self, services: &mut Services);

    /// `true` once the scene wants to hand over to [`link`](Self::link).
    fn is_detect_switch(&self) -> bool;

    /// Target chosen during the current visit.
    fn link(&self) -> Option<SceneId>;

    /// Every scene this one may link to. Checked when the machine is built.
    fn links(&self) -> Vec<SceneId> {
        Vec::new()
    }
}

//=== SceneSwitch =========================================================

/// Switch-request flag and outgoing link of a scene.
///
/// The first request of a visit wins; later requests are ignored until
/// [`reset`](Self::reset) is called from `enter`.
#[derive(Debug, Default, Clone)]
pub struct SceneSwitch {
    requested: bool,
    link: Option<SceneId>,
}

impl SceneSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the request. Called from `Scene::enter`.
    pub fn reset(&mut self) {
        self.requested = false;
        self.link = None;
    }

    /// Requests a switch to `target`. Returns `false` if this visit already
    /// requested one.
    pub fn request(&mut self, target: SceneId) -> bool {
        if self.requested {
            warn!(
                target: "scene",
                "Switch to {:?} ignored, {:?} already requested",
                target, self.link
            );
            return false;
        }
        self.requested = true;
        self.link = Some(target);
        true
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub fn link(&self) -> Option<SceneId> {
        self.link
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
