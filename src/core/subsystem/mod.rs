//=========================================================================
// Subsystem Registry
//=========================================================================
//
// Ordered lifecycle for long-lived engine services.
//
// Architecture:
//   Services::startup_order() → [&mut dyn Subsystem; N]
//                                      ↓
//   SubsystemRegistry::startup()   s1 → s2 → ... → sN
//   SubsystemRegistry::shutdown()  sN → ... → s2 → s1
//
// The registry is the only component allowed to start or stop a service.
// The services themselves are owned by `Services` and reached through its
// borrowing accessors.
//
//=========================================================================

//=== Module Declarations =================================================

mod services;

//=== Public API ==========================================================

pub use services::Services;

//=== External Dependencies ===============================================

use log::{error, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::config::ConfigError;
use crate::core::platform_bridge::PlatformError;

//=== Errors ==============================================================

/// Failure reported by a single subsystem during startup.
#[derive(Debug, Error)]
pub enum SubsystemError {
    /// Window or event loop could not be created.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Any other backend failure.
    #[error("{0}")]
    Backend(String),
}

/// Fatal startup failure. Names the subsystem that could not be started.
#[derive(Debug, Error)]
#[error("subsystem `{subsystem}` failed to start: {source}")]
pub struct StartupError {
    /// Name of the failing subsystem.
    pub subsystem: &'static str,

    /// Underlying failure.
    #[source]
    pub source: SubsystemError,
}

//=== Subsystem Trait =====================================================

/// Lifecycle contract of an engine service.
///
/// `startup` is called at most once, and `shutdown` is called exactly once
/// for every successful `startup`. Both are driven by [`SubsystemRegistry`].
pub trait Subsystem {
    /// Stable name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Brings the service from uninitialized to running.
    fn startup(&mut self) -> Result<(), SubsystemError>;

    /// Releases everything acquired in `startup`.
    fn shutdown(&mut self);
}

//=== SubsystemState ======================================================

/// Lifecycle state of a registered subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubsystemState {
    /// Never started (or not known to the registry).
    Uninitialized,

    /// Started and not yet shut down.
    Running,

    /// Shut down. Terminal.
    ShutDown,
}

//=== SubsystemRegistry ===================================================

#[derive(Debug)]
struct RegistryEntry {
    name: &'static str,
    state: SubsystemState,
}

/// Starts subsystems in order and stops them in exact reverse order.
///
/// The registry records the startup order it observed, so shutdown does
/// not depend on the caller passing the slice in the same order again,
/// only on it containing the same subsystems at the same positions.
#[derive(Debug, Default)]
pub struct SubsystemRegistry {
    entries: Vec<RegistryEntry>,
}

impl SubsystemRegistry {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Starts every subsystem in slice order.
    ///
    /// Stops at the first failure: the subsystems that were already running
    /// are shut down in reverse order and the failure is returned. No
    /// subsystem after the failing one is started.
    ///
    /// # Panics
    ///
    /// Panics if this registry already started subsystems.
    pub fn startup(&mut self, subsystems: &mut [&mut dyn Subsystem]) -> Result<(), StartupError> {
        assert!(
            self.entries.is_empty(),
            "SubsystemRegistry::startup called twice"
        );

        for index in 0..subsystems.len() {
            let name = subsystems[index].name();
            info!(target: "subsystem", "Starting {}", name);

            match subsystems[index].startup() {
                Ok(()) => self.entries.push(RegistryEntry {
                    name,
                    state: SubsystemState::Running,
                }),
                Err(source) => {
                    error!(target: "subsystem", "{} failed to start: {}", name, source);
                    self.shutdown(subsystems);
                    return Err(StartupError {
                        subsystem: name,
                        source,
                    });
                }
            }
        }

        info!(target: "subsystem", "{} subsystems running", self.entries.len());
        Ok(())
    }

    /// Shuts down every running subsystem in reverse startup order.
    ///
    /// Subsystems already shut down are skipped, so calling this twice is
    /// harmless.
    pub fn shutdown(&mut self, subsystems: &mut [&mut dyn Subsystem]) {
        assert!(
            subsystems.len() >= self.entries.len(),
            "shutdown received {} subsystems but {} were started",
            subsystems.len(),
            self.entries.len()
        );

        for (index, entry) in self.entries.iter_mut().enumerate().rev() {
            if entry.state != SubsystemState::Running {
                continue;
            }

            let subsystem = &mut *subsystems[index];
            if subsystem.name() != entry.name {
                warn!(
                    target: "subsystem",
                    "Slot {} holds {} but {} was started there",
                    index,
                    subsystem.name(),
                    entry.name
                );
            }

            info!(target: "subsystem", "Shutting down {}", entry.name);
            subsystem.shutdown();
            entry.state = SubsystemState::ShutDown;
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the lifecycle state of the named subsystem.
    pub fn state_of(&self, name: &str) -> SubsystemState {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.state)
            .unwrap_or(SubsystemState::Uninitialized)
    }

    /// Names of started subsystems, in startup order.
    pub fn startup_order(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Returns `true` while at least one subsystem is running.
    pub fn is_running(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.state == SubsystemState::Running)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
