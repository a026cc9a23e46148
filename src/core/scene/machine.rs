//=========================================================================
// Scene Machine
//=========================================================================
//
// Owns every scene and the identity of the current one.
//
// Scenes are stored in a HashMap by id and created once. The machine is
// never empty: `build` refuses a graph without a registered initial scene,
// and a transition only happens towards a registered scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneError, SceneId};
use crate::core::subsystem::Services;

//=== SceneMachineBuilder =================================================

/// Collects scenes and validates the graph they form.
#[derive(Default)]
pub struct SceneMachineBuilder {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
    initial: Option<SceneId>,
}

impl SceneMachineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `scene` under `id`, replacing any previous one.
    pub fn register<T>(mut self, id: SceneId, scene: T) -> Self
    where
        T: Scene + 'static,
    {
        if self.scenes.insert(id, Box::new(scene)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", id);
        }
        self
    }

    /// Scene entered by [`SceneMachine::start`].
    pub fn initial(mut self, id: SceneId) -> Self {
        self.initial = Some(id);
        self
    }

    /// Validates the graph and produces the machine.
    ///
    /// # Errors
    ///
    /// - [`SceneError::NoInitialScene`] if no initial scene was set
    /// - [`SceneError::UnregisteredScene`] if the initial scene is unknown
    /// - [`SceneError::DanglingLink`] if a wired link targets an unknown scene
    pub fn build(self) -> Result<SceneMachine, SceneError> {
        let initial = self.initial.ok_or(SceneError::NoInitialScene)?;
        if !self.scenes.contains_key(&initial) {
            return Err(SceneError::UnregisteredScene(initial));
        }

        for from in SceneId::ALL {
            let Some(scene) = self.scenes.get(&from) else {
                continue;
            };
            if let Some(to) = scene.links().into_iter().find(|to| !self.scenes.contains_key(to)) {
                return Err(SceneError::DanglingLink { from, to });
            }
        }

        debug!(
            target: "scene",
            "Scene graph built with {} scenes, initial {:?}",
            self.scenes.len(),
            initial
        );

        Ok(SceneMachine {
            scenes: self.scenes,
            current: initial,
            started: false,
        })
    }
}

//=== SceneMachine ========================================================

/// Drives the current scene and performs link-based transitions.
pub struct SceneMachine {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
    current: SceneId,
    started: bool,
}

impl SceneMachine {
    pub fn builder() -> SceneMachineBuilder {
        SceneMachineBuilder::new()
    }

    //--- Queries ----------------------------------------------------------

    /// The current scene. Before `start` this is the initial scene.
    pub fn current(&self) -> SceneId {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    //--- Lifecycle --------------------------------------------------------

    /// Enters the initial scene. Later calls do nothing.
    pub fn start(&mut self, services: &mut Services) -> Result<(), SceneError> {
        if self.started {
            warn!(target: "scene", "Scene machine already started");
            return Ok(());
        }

        let initial = self.current;
        info!(target: "scene", "Entering initial scene {:?}", initial);

        let scene = self.scene_mut(initial)?;
        scene.enter(services);
        if scene.is_detect_switch() {
            return Err(SceneError::SwitchNotCleared(initial));
        }

        self.started = true;
        Ok(())
    }

    /// Ticks the current scene.
    pub fn tick(&mut self, services: &mut Services, delta_seconds: f32) -> Result<(), SceneError> {
        if !self.started {
            warn!(target: "scene", "Tick before start ignored");
            return Ok(());
        }
        self.scene_mut(self.current)?.tick(services, delta_seconds);
        Ok(())
    }

    //--- Transition Processing --------------------------------------------

    /// Performs at most one transition.
    ///
    /// Should be called once per frame, after [`tick`](Self::tick). If the
    /// current scene requests a switch, it is exited, its link becomes
    /// current and is entered.
    ///
    /// Returns the new current scene if a transition happened.
    pub fn process_transition(
        &mut self,
        services: &mut Services,
    ) -> Result<Option<SceneId>, SceneError> {
        if !self.started {
            return Ok(None);
        }

        let from = self.current;
        let scene = self.scene_mut(from)?;
        if !scene.is_detect_switch() {
            return Ok(None);
        }

        let to = scene.link().ok_or(SceneError::MissingLink(from))?;
        if !self.scenes.contains_key(&to) {
            return Err(SceneError::UnregisteredScene(to));
        }

        debug!(target: "scene", "Switching scene {:?} -> {:?}", from, to);

        self.scene_mut(from)?.exit(services);
        self.current = to;

        let next = self.scene_mut(to)?;
        next.enter(services);
        if next.is_detect_switch() {
            return Err(SceneError::SwitchNotCleared(to));
        }

        Ok(Some(to))
    }

    //--- Internal Helpers -------------------------------------------------

    fn scene_mut(&mut self, id: SceneId) -> Result<&mut Box<dyn Scene>, SceneError> {
        self.scenes
            .get_mut(&id)
            .ok_or(SceneError::UnregisteredScene(id))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
