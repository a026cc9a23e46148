//=========================================================================
// Audio Service
//=========================================================================
//
// Playback front-end. Scenes queue sound effects here; the audio backend
// drains the queue and mixes. Volume and mute are applied at queue time.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::resource::Ruid;
use crate::core::subsystem::{Subsystem, SubsystemError};

//=== PlaybackRequest =====================================================

/// One queued sound effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRequest {
    /// Sound resource to play.
    pub sound: Ruid,
    /// Effective gain, 0.0..=1.0.
    pub volume: f32,
}

//=== AudioService ========================================================

/// Sound effect queue with master volume and mute.
#[derive(Debug)]
pub struct AudioService {
    master_volume: f32,
    muted: bool,
    pending: Vec<PlaybackRequest>,
    running: bool,
}

impl AudioService {
    pub(crate) fn new() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
            pending: Vec::new(),
            running: false,
        }
    }

    //--- Playback ---------------------------------------------------------

    /// Queues `sound` at the current master volume.
    ///
    /// Returns `false` when nothing was queued (muted, silent or stopped).
    pub fn play(&mut self, sound: Ruid) -> bool {
        let volume = self.effective_volume();
        if !self.running || volume <= 0.0 {
            trace!("Dropped playback of {} (volume {})", sound, volume);
            return false;
        }

        self.pending.push(PlaybackRequest { sound, volume });
        true
    }

    /// Hands the queued requests to the backend.
    pub fn drain_requests(&mut self) -> Vec<PlaybackRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[PlaybackRequest] {
        &self.pending
    }

    //--- Mixing Parameters ------------------------------------------------

    /// Sets the master volume, clamped to 0.0..=1.0.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
        debug!("Master volume set to {:.2}", self.master_volume);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain applied to new requests.
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }
}

//=== Subsystem ===========================================================

impl Subsystem for AudioService {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.running = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.pending.is_empty() {
            debug!("Discarding {} queued sounds", self.pending.len());
        }
        self.pending.clear();
        self.running = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
