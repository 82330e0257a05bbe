//! Mobile-goal clamp.

use std::sync::Arc;

use crate::hardware::Piston;

pub struct MogoClamp {
    piston: Arc<dyn Piston>,
    clamped: bool,
}

impl MogoClamp {
    pub fn new(piston: Arc<dyn Piston>) -> Self {
        Self {
            piston,
            clamped: false,
        }
    }

    pub fn clamp(&mut self) {
        self.piston.set(true);
        self.clamped = true;
    }

    pub fn unclamp(&mut self) {
        self.piston.set(false);
        self.clamped = false;
    }

    pub fn is_clamped(&self) -> bool {
        self.clamped
    }
}
