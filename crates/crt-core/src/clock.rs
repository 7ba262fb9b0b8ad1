//! The two clocks of the simulator.
//!
//! Physics runs on [`SimulationClock`], which advances by a fixed step per
//! tick regardless of frame rate. Trace fading runs on a [`WallClock`], so a
//! trail fades in real viewing time even when the simulation is slowed down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::config::DEFAULT_TIME_STEP;

/// Monotonic simulated time, advanced a fixed step at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    time: f64,
    step: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_STEP)
    }
}

impl SimulationClock {
    pub fn new(step: f64) -> Self {
        Self { time: 0.0, step }
    }

    /// Advance by the configured step and return the new time.
    pub fn step(&mut self) -> f64 {
        self.advance(self.step)
    }

    /// Advance by `dt` and return the new time. Non-positive or non-finite
    /// `dt` leaves the clock unchanged.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
        self.time
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_size(&self) -> f64 {
        self.step
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}

/// Source of real (viewing) time in seconds.
pub trait WallClock: Send + Sync {
    fn now_secs(&self) -> f64;
}

/// Wall clock backed by [`Instant`], measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemWallClock {
    origin: Instant,
}

impl Default for SystemWallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemWallClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl WallClock for SystemWallClock {
    fn now_secs(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Atomic f64 wrapper so a manual clock can be shared and set through `&self`.
#[derive(Debug)]
pub struct AtomicF64(AtomicU64);

impl AtomicF64 {
    pub fn new(val: f64) -> Self {
        Self(AtomicU64::new(val.to_bits()))
    }

    pub fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, val: f64) {
        self.0.store(val.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF64 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Wall clock that only moves when told to. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct ManualWallClock {
    now: AtomicF64,
}

impl ManualWallClock {
    pub fn new(start_secs: f64) -> Self {
        Self { now: AtomicF64::new(start_secs) }
    }

    pub fn set(&self, secs: f64) {
        self.now.store(secs);
    }

    pub fn advance(&self, secs: f64) -> f64 {
        let next = self.now.load() + secs;
        self.now.store(next);
        next
    }
}

impl WallClock for ManualWallClock {
    fn now_secs(&self) -> f64 {
        self.now.load()
    }
}
