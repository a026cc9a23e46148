//=========================================================================
// Services
//=========================================================================
//
// Owner of the seven engine services.
//
// Separates *who owns a service* from *who may start or stop it*:
//   Services           owns platform, input, audio, render, resource,
//                      entity and config, hands out borrows
//   SubsystemRegistry  decides when each of them starts and stops
//
// Scenes receive `&mut Services` and reach a service through the thin
// accessors below. None of the accessors can start or stop a service.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};

//=== Internal Dependencies ===============================================

use super::Subsystem;
use crate::core::audio::AudioService;
use crate::core::config::ConfigService;
use crate::core::entity::EntityService;
use crate::core::input::InputService;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::render::RenderService;
use crate::core::resource::ResourceService;
use crate::platform::{PlatformBackend, PlatformService, WindowSettings};

//=== Services ============================================================

/// Context object holding every engine service.
pub struct Services {
    platform: PlatformService,
    input: InputService,
    audio: AudioService,
    render: RenderService,
    resources: ResourceService,
    entities: EntityService,
    config: ConfigService,
}

impl Services {
    //--- Construction -----------------------------------------------------

    /// Creates all services in their uninitialized state.
    ///
    /// The platform backend and the input service are connected through
    /// one unbounded channel; both ends stay on the calling thread.
    pub(crate) fn new(
        backend: Box<dyn PlatformBackend>,
        window: WindowSettings,
        config_path: Option<PathBuf>,
    ) -> Self {
        let (sender, receiver) = unbounded();

        Self {
            platform: PlatformService::new(backend, window, sender),
            input: InputService::new(receiver),
            audio: AudioService::new(),
            render: RenderService::new(),
            resources: ResourceService::new(),
            entities: EntityService::new(),
            config: ConfigService::new(config_path),
        }
    }

    //--- Lifecycle Order --------------------------------------------------

    /// Services in dependency order: platform, input, audio, render,
    /// resource, entity, config.
    ///
    /// Passed to the registry for startup, and again for shutdown, which
    /// walks it backwards.
    pub(crate) fn startup_order(&mut self) -> [&mut dyn Subsystem; 7] {
        [
            &mut self.platform,
            &mut self.input,
            &mut self.audio,
            &mut self.render,
            &mut self.resources,
            &mut self.entities,
            &mut self.config,
        ]
    }

    //--- Frame Work -------------------------------------------------------

    /// Pumps the platform and dispatches the resulting input for this frame.
    ///
    /// Window event actions (e.g. close → quit) run synchronously in here.
    pub(crate) fn poll_input(&mut self) {
        self.poll_input_after(Duration::ZERO);
    }

    /// Like [`poll_input`](Self::poll_input), but lets the platform block
    /// for `wait` first, still handling OS events while it waits.
    pub(crate) fn poll_input_after(&mut self, wait: Duration) {
        self.platform.pump(wait);
        self.input.tick();
    }

    /// Sender feeding the input service, for injecting platform events.
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.platform.event_sender()
    }

    //--- Accessors --------------------------------------------------------

    pub fn platform(&self) -> &PlatformService {
        &self.platform
    }

    pub fn input(&self) -> &InputService {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputService {
        &mut self.input
    }

    pub fn audio(&self) -> &AudioService {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioService {
        &mut self.audio
    }

    pub fn render(&self) -> &RenderService {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut RenderService {
        &mut self.render
    }

    pub fn resources(&self) -> &ResourceService {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceService {
        &mut self.resources
    }

    pub fn entities(&self) -> &EntityService {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityService {
        &mut self.entities
    }

    pub fn config(&self) -> &ConfigService {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ConfigService {
        &mut self.config
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
impl Services {
    /// Headless services with no config file, already started.
    pub(crate) fn started_for_tests() -> Self {
        let mut services = Self::new(
            Box::new(crate::platform::HeadlessBackend::new()),
            WindowSettings::default(),
            None,
        );
        for subsystem in services.startup_order() {
            subsystem
                .startup()
                .expect("headless subsystems always start");
        }
        services
    }
}
