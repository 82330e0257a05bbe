//! Async rendition of the hold loop on a tokio scheduler.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use crossbeam::channel::Sender;
use tokio::time::{interval, Duration};

use crate::config::{HoldMode, HoldTunables};
use crate::control::hold::HoldStats;
use crate::control::pid::HoldPid;
use crate::hardware::{BrakeMode, JointMotor, PositionSensor};
use crate::ipc::HoldEvent;

/// Same loop as the threaded worker, suspending on a tokio interval
/// instead of a thread sleep. Cancellation and events are identical.
pub async fn hold_task(
    sensor: Arc<dyn PositionSensor>,
    motor_a: Arc<dyn JointMotor>,
    motor_b: Arc<dyn JointMotor>,
    tunables: HoldTunables,
    target: f64,
    stats: Arc<HoldStats>,
    events: Sender<HoldEvent>,
) {
    motor_a.set_brake_mode(BrakeMode::Hold);
    motor_b.set_brake_mode(BrakeMode::Hold);

    let mut pid = HoldPid::new(tunables.kp, tunables.ki, tunables.kd);
    let mut ticker = interval(Duration::from_millis(tunables.sample_interval_ms));
    let mut last_output = 0.0;
    let mut announced_convergence = false;

    loop {
        ticker.tick().await;

        if stats.cancel.load(Ordering::Relaxed) {
            motor_a.command(0.0);
            motor_b.command(0.0);
            let _ = events.try_send(HoldEvent::Cancelled { last_output });
            break;
        }

        let mut position = sensor.position();
        if position < tunables.sensor_low_threshold {
            sensor.set_position(tunables.sensor_recovery_value);
            stats.corrections.fetch_add(1, Ordering::Relaxed);
            let _ = events.try_send(HoldEvent::DiscontinuityCorrected {
                raw: position,
                corrected: tunables.sensor_recovery_value,
            });
            position = tunables.sensor_recovery_value;
        }

        let error = target - position;
        let output = pid.step(error).clamp(tunables.min_output, tunables.max_output);

        motor_a.command(output);
        motor_b.command(-output);
        last_output = output;

        stats.iterations.fetch_add(1, Ordering::Relaxed);

        let within = error.abs() <= tunables.tolerance;
        stats.within_tolerance.store(within, Ordering::Relaxed);
        if within {
            if !announced_convergence {
                announced_convergence = true;
                let _ = events.try_send(HoldEvent::Converged {
                    error,
                    holding: tunables.mode == HoldMode::HoldForever,
                });
            }
            if tunables.mode == HoldMode::StopOnConverge {
                motor_a.command(0.0);
                motor_b.command(0.0);
                break;
            }
        } else {
            announced_convergence = false;
        }
    }
}
