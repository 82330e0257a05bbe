//! Small hardware facades for the remaining mechanisms.

pub mod clamp;
pub mod doinker;
pub mod intake;
pub mod ring_stopper;
