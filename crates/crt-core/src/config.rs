use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ensure_positive, SimResult};

/// Maximum fraction-of-screen deflection reached at 100 units of drive.
pub const DEFAULT_MAX_DEFLECTION: f64 = 0.15;
/// Fixed simulated-time step per tick.
pub const DEFAULT_TIME_STEP: f64 = 0.002;
/// Peak drive of the sinusoidal oscillators, in slider units.
pub const DEFAULT_SINUSOIDAL_AMPLITUDE: f64 = 80.0;
/// Drive value that maps onto `max_deflection`.
pub const FULL_SCALE_DRIVE: f64 = 100.0;

/// Fixed scope constants consumed by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub max_deflection: f64,
    pub time_step: f64,
    pub sinusoidal_amplitude: f64,
    /// Clamp computed positions to `±max_deflection`. Off by default.
    pub clamp_to_screen: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            max_deflection: DEFAULT_MAX_DEFLECTION,
            time_step: DEFAULT_TIME_STEP,
            sinusoidal_amplitude: DEFAULT_SINUSOIDAL_AMPLITUDE,
            clamp_to_screen: false,
        }
    }
}

impl ScopeConfig {
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive("max_deflection", self.max_deflection)?;
        ensure_positive("time_step", self.time_step)?;
        ensure_positive("sinusoidal_amplitude", self.sinusoidal_amplitude)?;
        Ok(())
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: ScopeConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("Loaded scope config from {:?}", path);
        Ok(config)
    }

    /// Save the configuration to disk as pretty JSON.
    pub fn save(&self, path: &Path) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
