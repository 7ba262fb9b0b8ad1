use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ensure_finite, ensure_positive, SimError, SimResult};

/// Acceleration voltage that corresponds to full beam brightness.
pub const BRIGHTNESS_DIVISOR: f64 = 5000.0;

/// How the plate drive signals are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeflectionMode {
    /// Plate voltages come straight from the vertical/horizontal controls.
    #[default]
    Manual,
    /// Both plates are driven by sine oscillators.
    Sinusoidal,
}

impl DeflectionMode {
    pub fn name(&self) -> &'static str {
        match self {
            DeflectionMode::Manual => "manual",
            DeflectionMode::Sinusoidal => "sinusoidal",
        }
    }
}

impl fmt::Display for DeflectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeflectionMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(DeflectionMode::Manual),
            "sinusoidal" | "sin" | "sine" => Ok(DeflectionMode::Sinusoidal),
            other => Err(SimError::invalid("mode", format!("unknown mode '{other}'"))),
        }
    }
}

/// Nominal control range of a parameter. Informational only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalRange {
    pub min: f64,
    pub max: f64,
}

impl NominalRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const ACCELERATION_RANGE: NominalRange = NominalRange::new(0.0, 5000.0);
pub const PLATE_VOLTAGE_RANGE: NominalRange = NominalRange::new(-100.0, 100.0);
pub const PERSISTENCE_RANGE: NominalRange = NominalRange::new(1.0, 10.0);
pub const FREQUENCY_RANGE: NominalRange = NominalRange::new(0.1, 10.0);
pub const PHASE_RANGE: NominalRange = NominalRange::new(0.0, std::f64::consts::TAU);

/// One complete snapshot of the operator's controls.
///
/// Voltages are abstract slider units; frequencies are cycles per unit of
/// simulated time; `phase` is in radians and only offsets the horizontal
/// oscillator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub mode: DeflectionMode,
    pub acceleration_voltage: f64,
    pub vertical_voltage: f64,
    pub horizontal_voltage: f64,
    pub frequency_vertical: f64,
    pub frequency_horizontal: f64,
    pub phase: f64,
    pub persistence_seconds: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            mode: DeflectionMode::Manual,
            acceleration_voltage: 2000.0,
            vertical_voltage: 0.0,
            horizontal_voltage: 0.0,
            frequency_vertical: 1.0,
            frequency_horizontal: 1.0,
            phase: 0.0,
            persistence_seconds: 3.0,
        }
    }
}

impl SimulationParameters {
    pub fn manual(vertical_voltage: f64, horizontal_voltage: f64) -> Self {
        Self {
            mode: DeflectionMode::Manual,
            vertical_voltage,
            horizontal_voltage,
            ..Default::default()
        }
    }

    pub fn sinusoidal(frequency_vertical: f64, frequency_horizontal: f64, phase: f64) -> Self {
        Self {
            mode: DeflectionMode::Sinusoidal,
            frequency_vertical,
            frequency_horizontal,
            phase,
            ..Default::default()
        }
    }

    pub fn with_persistence(mut self, persistence_seconds: f64) -> Self {
        self.persistence_seconds = persistence_seconds;
        self
    }

    pub fn with_acceleration(mut self, acceleration_voltage: f64) -> Self {
        self.acceleration_voltage = acceleration_voltage;
        self
    }

    /// Check the snapshot before it may become active.
    ///
    /// Values outside the nominal control ranges are accepted; only
    /// non-finite numbers, non-positive persistence and negative acceleration
    /// are rejected.
    pub fn validate(&self) -> SimResult<()> {
        ensure_finite("vertical_voltage", self.vertical_voltage)?;
        ensure_finite("horizontal_voltage", self.horizontal_voltage)?;
        ensure_finite("frequency_vertical", self.frequency_vertical)?;
        ensure_finite("frequency_horizontal", self.frequency_horizontal)?;
        ensure_finite("phase", self.phase)?;
        ensure_positive("persistence_seconds", self.persistence_seconds)?;
        ensure_finite("acceleration_voltage", self.acceleration_voltage)?;
        if self.acceleration_voltage < 0.0 {
            return Err(SimError::invalid(
                "acceleration_voltage",
                format!("must be >= 0, got {}", self.acceleration_voltage),
            ));
        }
        Ok(())
    }

    /// Opacity of the live beam spot: `|acceleration| / 5000`, unclamped.
    pub fn beam_intensity(&self) -> f64 {
        (self.acceleration_voltage / BRIGHTNESS_DIVISOR).abs()
    }

    /// Peak trace opacity, `beam_intensity` clamped to `[0, 1]`.
    pub fn intensity_factor(&self) -> f64 {
        self.beam_intensity().clamp(0.0, 1.0)
    }

    /// Load a parameter snapshot from a JSON file and validate it.
    pub fn load(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: SimulationParameters = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let p = SimulationParameters::default();
        assert_eq!(p.mode, DeflectionMode::Manual);
        assert_eq!(p.persistence_seconds, 3.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_persistence() {
        let p = SimulationParameters::default().with_persistence(-1.0);
        assert!(matches!(
            p.validate(),
            Err(SimError::InvalidConfiguration { what: "persistence_seconds", .. })
        ));
        let p = SimulationParameters::default().with_persistence(0.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_inputs() {
        let mut p = SimulationParameters::default();
        p.phase = f64::NAN;
        assert!(matches!(p.validate(), Err(SimError::NonFinite { what: "phase", .. })));

        let mut p = SimulationParameters::default();
        p.frequency_vertical = f64::INFINITY;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_acceleration() {
        let p = SimulationParameters::default().with_acceleration(-10.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_out_of_nominal_range_is_accepted() {
        let p = SimulationParameters::manual(250.0, -400.0);
        assert!(!PLATE_VOLTAGE_RANGE.contains(p.vertical_voltage));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_intensity() {
        let p = SimulationParameters::default();
        assert!((p.beam_intensity() - 0.4).abs() < 1e-12);
        assert!((p.intensity_factor() - 0.4).abs() < 1e-12);

        let bright = SimulationParameters::default().with_acceleration(7500.0);
        assert!((bright.beam_intensity() - 1.5).abs() < 1e-12);
        assert_eq!(bright.intensity_factor(), 1.0);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Manual".parse::<DeflectionMode>().unwrap(), DeflectionMode::Manual);
        assert_eq!("sin".parse::<DeflectionMode>().unwrap(), DeflectionMode::Sinusoidal);
        assert!("triangle".parse::<DeflectionMode>().is_err());
    }

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let file = format!("crt-scope-{}-{}.json", name, std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let json = r#"{ "mode": "sinusoidal", "frequency_vertical": 2.0 }"#;
        let path = write_temp("params-ok", json);
        let loaded = SimulationParameters::load(&path);
        let _ = std::fs::remove_file(&path);
        let p = loaded.unwrap();
        assert_eq!(p.mode, DeflectionMode::Sinusoidal);
        assert_eq!(p.frequency_vertical, 2.0);
    }

    #[test]
    fn test_load_rejects_negative_persistence() {
        let path = write_temp("params-neg", r#"{ "persistence_seconds": -1 }"#);
        let loaded = SimulationParameters::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(
            loaded,
            Err(SimError::InvalidConfiguration { what: "persistence_seconds", .. })
        ));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = write_temp("params-bad", r#"{ "mode": "manual", "#);
        let loaded = SimulationParameters::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(loaded, Err(SimError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("crt-scope-does-not-exist.json");
        assert!(matches!(SimulationParameters::load(&path), Err(SimError::Io(_))));
    }

    #[test]
    fn test_json_mode_is_lowercase() {
        let p: SimulationParameters =
            serde_json::from_str(r#"{ "mode": "sinusoidal", "phase": 1.5 }"#).unwrap();
        assert_eq!(p.mode, DeflectionMode::Sinusoidal);
        assert_eq!(p.phase, 1.5);
        assert_eq!(p.acceleration_voltage, 2000.0);
    }
}
