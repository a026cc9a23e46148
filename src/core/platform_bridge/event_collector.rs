//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → frame events → InputService
//
// Bounded polling keeps a flood of events from stalling a frame; whatever
// is left over is picked up on the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::PlatformEvent;

//=== EventCollector ======================================================

/// Collects pending platform events, at most `MAX_EVENTS_PER_FRAME` per frame.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    frame_events: Vec<PlatformEvent>,
}

impl EventCollector {
    pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            frame_events: Vec::with_capacity(4),
        }
    }

    /// Drains pending platform events into the frame buffer.
    ///
    /// Returns the number of events collected. A disconnected channel is
    /// treated as empty.
    pub(crate) fn collect_frame(&mut self) -> usize {
        self.frame_events.clear();

        while self.frame_events.len() < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => self.frame_events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if self.frame_events.len() >= Self::MAX_EVENTS_PER_FRAME {
            warn!(
                target: "input",
                "Event queue backlog: {} events deferred to next frame",
                self.receiver.len()
            );
        }

        self.frame_events.len()
    }

    /// Takes ownership of the collected events, leaving an empty buffer.
    pub(crate) fn take_events(&mut self) -> Vec<PlatformEvent> {
        std::mem::take(&mut self.frame_events)
    }

    /// Discards everything still queued.
    pub(crate) fn discard_pending(&mut self) -> usize {
        self.frame_events.clear();
        self.receiver.try_iter().count()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
