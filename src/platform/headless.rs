//=========================================================================
// Headless Backend
//=========================================================================
//
// Window-less platform backend. Each pump sleeps out its wait, then
// replays the next batch of a pre-recorded script; once the script runs
// out, pumps produce nothing.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::debug;

//=== Internal Dependencies ===============================================

use super::{send_event, PlatformBackend, WindowSettings};
use crate::core::platform_bridge::{PlatformError, PlatformEvent};

//=== HeadlessBackend =====================================================

/// Platform backend without a window.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    script: VecDeque<Vec<PlatformEvent>>,
    sender: Option<Sender<PlatformEvent>>,
    pumps: u64,
}

impl HeadlessBackend {
    /// Backend that never produces events.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend replaying `frames`, one batch per pump.
    pub fn with_script(frames: Vec<Vec<PlatformEvent>>) -> Self {
        Self {
            script: frames.into(),
            ..Self::default()
        }
    }

    /// Number of pumps since startup.
    pub fn pumps(&self) -> u64 {
        self.pumps
    }
}

impl PlatformBackend for HeadlessBackend {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn startup(
        &mut self,
        window: &WindowSettings,
        sender: Sender<PlatformEvent>,
    ) -> Result<(), PlatformError> {
        debug!(
            target: "platform",
            "Headless backend standing in for `{}` ({} scripted frames)",
            window.title,
            self.script.len()
        );
        self.sender = Some(sender);
        self.pumps = 0;
        Ok(())
    }

    fn pump(&mut self, wait: Duration) {
        let Some(sender) = self.sender.as_ref() else {
            return;
        };
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.pumps += 1;

        if let Some(batch) = self.script.pop_front() {
            for event in batch {
                send_event(sender, event);
            }
        }
    }

    fn shutdown(&mut self) {
        self.sender = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
