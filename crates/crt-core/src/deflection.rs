use std::f64::consts::TAU;

use crate::config::{ScopeConfig, FULL_SCALE_DRIVE};
use crate::parameter::{DeflectionMode, SimulationParameters};
use crate::position::BeamPosition;

/// Instantaneous drive on each pair of plates, in slider units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveSignal {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Maps a parameter snapshot and simulated time onto a beam position.
///
/// Pure and deterministic: the same `(params, t)` always gives the same
/// position, so a mode switch only affects ticks computed after it.
#[derive(Debug, Clone, Default)]
pub struct DeflectionModel {
    config: ScopeConfig,
}

impl DeflectionModel {
    pub fn new(config: ScopeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// Derive the plate drive for the current mode.
    pub fn drive_signals(&self, params: &SimulationParameters, t: f64) -> DriveSignal {
        match params.mode {
            DeflectionMode::Manual => DriveSignal {
                horizontal: params.horizontal_voltage,
                vertical: params.vertical_voltage,
            },
            DeflectionMode::Sinusoidal => {
                let amplitude = self.config.sinusoidal_amplitude;
                let wy = TAU * params.frequency_vertical;
                let wx = TAU * params.frequency_horizontal;
                DriveSignal {
                    horizontal: amplitude * (wx * t + params.phase).sin(),
                    vertical: amplitude * (wy * t).sin(),
                }
            }
        }
    }

    /// Scale drive to screen fraction. Mode independent.
    pub fn normalize(&self, drive: DriveSignal) -> BeamPosition {
        let max = self.config.max_deflection;
        let position = BeamPosition::new(
            (drive.horizontal / FULL_SCALE_DRIVE) * max,
            (drive.vertical / FULL_SCALE_DRIVE) * max,
        );
        if self.config.clamp_to_screen {
            position.clamped(max)
        } else {
            position
        }
    }

    pub fn compute_position(&self, params: &SimulationParameters, t: f64) -> BeamPosition {
        self.normalize(self.drive_signals(params, t))
    }
}
