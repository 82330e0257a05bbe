//! Simulated devices for tests and the demo binary.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{BrakeMode, JointMotor, Piston, PositionSensor};

/// Rotation sensor backed by a shared cell. Corrective writes are recorded
/// separately so tests can count how often the wrap guard fired.
pub struct SimRotationSensor {
    value: Mutex<f64>,
    writes: Mutex<Vec<f64>>,
}

impl SimRotationSensor {
    pub fn new(initial: f64) -> Arc<Self> {
        Arc::new(Self {
            value: Mutex::new(initial),
            writes: Mutex::new(Vec::new()),
        })
    }

    /// Overrides the reading from the test side without recording a write.
    pub fn feed(&self, value: f64) {
        *self.value.lock() = value;
    }

    pub fn writes(&self) -> Vec<f64> {
        self.writes.lock().clone()
    }
}

impl PositionSensor for SimRotationSensor {
    fn position(&self) -> f64 {
        *self.value.lock()
    }

    fn set_position(&self, value: f64) {
        *self.value.lock() = value;
        self.writes.lock().push(value);
    }
}

/// Motor that records its brake mode and full command history.
pub struct SimMotor {
    brake_mode: Mutex<Option<BrakeMode>>,
    commands: Mutex<Vec<f64>>,
}

impl SimMotor {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            brake_mode: Mutex::new(None),
            commands: Mutex::new(Vec::new()),
        })
    }

    pub fn last_command(&self) -> Option<f64> {
        self.commands.lock().last().copied()
    }

    pub fn commands(&self) -> Vec<f64> {
        self.commands.lock().clone()
    }

    pub fn brake_mode(&self) -> Option<BrakeMode> {
        *self.brake_mode.lock()
    }
}

impl JointMotor for SimMotor {
    fn set_brake_mode(&self, mode: BrakeMode) {
        *self.brake_mode.lock() = Some(mode);
    }

    fn command(&self, power: f64) {
        self.commands.lock().push(power);
    }
}

pub struct SimPiston {
    state: Mutex<bool>,
}

impl SimPiston {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(false),
        })
    }

    pub fn extended(&self) -> bool {
        *self.state.lock()
    }
}

impl Piston for SimPiston {
    fn set(&self, extended: bool) {
        *self.state.lock() = extended;
    }
}

/// Toy plant for closed-loop runs: each step integrates motor A's last
/// commanded power into the sensor reading, with seeded disturbance.
pub struct SimJoint {
    sensor: Arc<SimRotationSensor>,
    motor_a: Arc<SimMotor>,
    rng: StdRng,
    pub gain: f64,
    pub noise_amplitude: f64,
}

impl SimJoint {
    pub fn new(sensor: Arc<SimRotationSensor>, motor_a: Arc<SimMotor>, seed: u64) -> Self {
        Self {
            sensor,
            motor_a,
            rng: StdRng::seed_from_u64(seed),
            gain: 0.8,
            noise_amplitude: 2.0,
        }
    }

    /// Advances the plant by one tick.
    pub fn step(&mut self) {
        let power = self.motor_a.last_command().unwrap_or(0.0);
        let noise = if self.noise_amplitude > 0.0 {
            self.rng.gen_range(-self.noise_amplitude..self.noise_amplitude)
        } else {
            0.0
        };
        let next = self.sensor.position() + power * self.gain + noise;
        self.sensor.feed(next);
    }
}
