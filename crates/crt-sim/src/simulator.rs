//! Per-frame driver tying the deflection model to the trace buffer.
//!
//! One tick = apply pending parameters, advance simulated time, compute the
//! beam position, record it, evict expired trace points, and hand the
//! renderer everything it needs for that frame.

use crt_core::{
    BeamPosition, DeflectionModel, ScopeConfig, SimResult, SimulationClock, SimulationParameters,
};
use crt_trace::{TraceBuffer, VisibleTracePoint};
use serde::{Deserialize, Serialize};

use crate::handoff::{ParameterHandle, ParameterInbox};

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub simulated_time: f64,
    pub beam_position: BeamPosition,
    /// Opacity of the live spot, `|acceleration| / 5000`.
    pub beam_intensity: f64,
    /// Retained trail, oldest first, with opacity already applied.
    pub visible_trace_points: Vec<VisibleTracePoint>,
}

pub struct Simulator {
    model: DeflectionModel,
    clock: SimulationClock,
    params: SimulationParameters,
    inbox: ParameterInbox,
    trace: TraceBuffer,
    beam: BeamPosition,
    ticks: u64,
}

impl Simulator {
    pub fn new(config: ScopeConfig, params: SimulationParameters) -> SimResult<Self> {
        config.validate()?;
        params.validate()?;
        let clock = SimulationClock::new(config.time_step);
        Ok(Self {
            model: DeflectionModel::new(config),
            clock,
            params,
            inbox: ParameterInbox::new(),
            trace: TraceBuffer::new(),
            beam: BeamPosition::CENTER,
            ticks: 0,
        })
    }

    /// Replace the active parameter snapshot. Takes effect on the next tick.
    ///
    /// An invalid snapshot is rejected and the previous one stays active.
    /// A snapshot still waiting from a [`ParameterHandle`] is older than this
    /// one and is dropped.
    pub fn on_parameter_change(&mut self, params: SimulationParameters) -> SimResult<()> {
        if let Err(e) = params.validate() {
            log::warn!("Rejected parameter update: {}", e);
            return Err(e);
        }
        if self.inbox.discard() {
            log::debug!("Dropped a queued parameter snapshot superseded by a direct update");
        }
        self.apply(params);
        Ok(())
    }

    /// A cloneable handle for delivering parameters from other threads.
    /// Queued snapshots are applied at the start of the next tick.
    pub fn parameter_handle(&self) -> ParameterHandle {
        self.inbox.handle()
    }

    /// Advance simulated time by `dt` and produce the frame for wall-clock
    /// time `now` (seconds).
    pub fn tick(&mut self, dt: f64, now: f64) -> FrameOutput {
        if let Some(params) = self.inbox.take_latest() {
            self.apply(params);
        }
        let params = &self.params;

        let t = self.clock.advance(dt);
        self.beam = self.model.compute_position(params, t);

        self.trace.record(self.beam, now);
        self.trace.evict_expired(now, params.persistence_seconds);

        let visible_trace_points = self
            .trace
            .visible_points(now, params.persistence_seconds, params.intensity_factor())
            .collect();

        self.ticks += 1;
        FrameOutput {
            simulated_time: t,
            beam_position: self.beam,
            beam_intensity: params.beam_intensity(),
            visible_trace_points,
        }
    }

    /// Tick with the configured fixed time step.
    pub fn step(&mut self, now: f64) -> FrameOutput {
        let dt = self.clock.step_size();
        self.tick(dt, now)
    }

    fn apply(&mut self, params: SimulationParameters) {
        if params.mode != self.params.mode {
            log::debug!("Deflection mode {} -> {}", self.params.mode, params.mode);
        }
        if params.persistence_seconds != self.params.persistence_seconds {
            log::debug!(
                "Persistence {}s -> {}s",
                self.params.persistence_seconds,
                params.persistence_seconds
            );
        }
        self.params = params;
    }

    /// Clear the trail and restart simulated time. Parameters are kept.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.trace.clear();
        self.beam = BeamPosition::CENTER;
        self.ticks = 0;
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn config(&self) -> &ScopeConfig {
        self.model.config()
    }

    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    pub fn beam_position(&self) -> BeamPosition {
        self.beam
    }

    pub fn simulated_time(&self) -> f64 {
        self.clock.time()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
