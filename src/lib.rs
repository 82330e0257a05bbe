//! Position-hold control for a two-motor antagonistic arm joint, plus the
//! small subsystem facades around it and simulated hardware for bench runs.

pub mod analysis;
pub mod async_impl;
pub mod config;
pub mod control;
pub mod hardware;
pub mod ipc;
pub mod metrics;
pub mod subsystems;

pub use config::{load_config, HoldMode, HoldTunables};
pub use control::hold::{HoldController, HoldStats};
pub use control::pid::HoldPid;
pub use hardware::{BrakeMode, JointMotor, Piston, PositionSensor};
pub use ipc::{DiagnosticLog, HoldEvent, HoldEvents};
pub use metrics::{LoopMetrics, LoopReport};
