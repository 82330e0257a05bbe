//! Ring intake roller.

use std::sync::Arc;

use crate::hardware::{BrakeMode, JointMotor};

const FULL_POWER: f64 = 127.0;

pub struct Intake {
    motor: Arc<dyn JointMotor>,
    running: bool,
}

impl Intake {
    pub fn new(motor: Arc<dyn JointMotor>) -> Self {
        Self {
            motor,
            running: false,
        }
    }

    /// Runs the roller inward at a percentage of full power.
    pub fn intake(&mut self, velocity_percent: f64) {
        self.motor.command(FULL_POWER * velocity_percent / 100.0);
        self.running = true;
    }

    /// Runs the roller outward at a percentage of full power.
    pub fn outtake(&mut self, velocity_percent: f64) {
        self.motor.command(-FULL_POWER * velocity_percent / 100.0);
        self.running = true;
    }

    /// Coasts the roller to a stop.
    pub fn stop(&mut self) {
        self.motor.set_brake_mode(BrakeMode::Coast);
        self.motor.command(0.0);
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
