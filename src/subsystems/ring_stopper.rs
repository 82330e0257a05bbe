//! Pneumatic ring stopper ahead of the intake.

use std::sync::Arc;

use crate::hardware::Piston;

pub struct RingStopper {
    piston: Arc<dyn Piston>,
    lowered: bool,
}

impl RingStopper {
    pub fn new(piston: Arc<dyn Piston>) -> Self {
        Self {
            piston,
            lowered: false,
        }
    }

    pub fn lower(&mut self) {
        self.piston.set(true);
        self.lowered = true;
    }

    pub fn raise(&mut self) {
        self.piston.set(false);
        self.lowered = false;
    }

    pub fn is_lowered(&self) -> bool {
        self.lowered
    }
}
