//! Hold-loop configuration, loaded from a TOML file at startup.

use serde::Deserialize;

/// Loop-exit policy once the position error is inside tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoldMode {
    /// Keep correcting until the task is cancelled.
    HoldForever,
    /// Zero the motors and let the task finish on its own.
    StopOnConverge,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoldTunables {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Error magnitude counted as converged, in encoder ticks.
    pub tolerance: f64,
    pub min_output: f64,
    pub max_output: f64,
    /// Readings below this are treated as a sensor wrap artifact.
    pub sensor_low_threshold: f64,
    /// Value written back into the sensor when the wrap guard fires.
    pub sensor_recovery_value: f64,
    pub sample_interval_ms: u64,
    pub mode: HoldMode,
}

impl Default for HoldTunables {
    fn default() -> Self {
        Self {
            kp: 0.4,
            ki: 0.0,
            kd: 0.2,
            tolerance: 200.0,
            min_output: -127.0,
            max_output: 127.0,
            sensor_low_threshold: 10_000.0,
            sensor_recovery_value: 35_800.0,
            sample_interval_ms: 10,
            mode: HoldMode::HoldForever,
        }
    }
}

pub fn load_config(path: &str) -> HoldTunables {
    match std::fs::read_to_string(path) {
        Ok(s) => toml::from_str::<HoldTunables>(&s).unwrap_or_default(),
        Err(_) => HoldTunables::default(),
    }
}
