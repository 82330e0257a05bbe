//! Pneumatic doinker arm.

use std::sync::Arc;

use crate::hardware::Piston;

pub struct Doinker {
    piston: Arc<dyn Piston>,
    lowered: bool,
}

impl Doinker {
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
