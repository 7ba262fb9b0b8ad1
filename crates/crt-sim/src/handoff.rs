use std::sync::{Arc, Weak};

use crossbeam::queue::ArrayQueue;
use crt_core::{SimError, SimResult, SimulationParameters};

/// Writer side of the parameter handoff.
///
/// Snapshots are validated here, so an invalid update never reaches the
/// simulator. Cloneable so any thread may hold one.
#[derive(Clone)]
pub struct ParameterHandle {
    slot: Weak<ArrayQueue<SimulationParameters>>,
}

impl ParameterHandle {
    /// Validate and queue a snapshot for the next tick, replacing any
    /// snapshot still waiting.
    pub fn submit(&self, params: SimulationParameters) -> SimResult<()> {
        if let Err(e) = params.validate() {
            log::warn!("Rejected parameter update: {}", e);
            return Err(e);
        }
        let slot = self.slot.upgrade().ok_or(SimError::Disconnected)?;
        if slot.force_push(params).is_some() {
            log::trace!("Replaced an unapplied parameter snapshot");
        }
        Ok(())
    }
}

/// Reader side, owned by the simulator.
///
/// A single slot: the newest submitted snapshot overwrites an older one that
/// has not been taken yet, so memory stays constant between ticks.
pub struct ParameterInbox {
    slot: Arc<ArrayQueue<SimulationParameters>>,
}

impl Default for ParameterInbox {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterInbox {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(ArrayQueue::new(1)),
        }
    }

    /// Get a sender handle for the controller.
    pub fn handle(&self) -> ParameterHandle {
        ParameterHandle {
            slot: Arc::downgrade(&self.slot),
        }
    }

    /// Take the newest snapshot, if one arrived since the last call.
    pub fn take_latest(&self) -> Option<SimulationParameters> {
        self.slot.pop()
    }

    /// Drop any waiting snapshot. Returns true if one was discarded.
    pub fn discard(&self) -> bool {
        self.slot.pop().is_some()
    }

    pub fn pending(&self) -> usize {
        self.slot.len()
    }
}
