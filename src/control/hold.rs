//! Hold-task lifecycle and the control loop itself.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{Receiver, Sender};
use parking_lot::Mutex;

use crate::config::{HoldMode, HoldTunables};
use crate::control::pid::HoldPid;
use crate::hardware::{BrakeMode, JointMotor, PositionSensor};
use crate::ipc::{DiagnosticLog, HoldEvent, HoldEvents};
use crate::metrics::LoopMetrics;

/// Counters shared between a running hold task and its owner.
pub struct HoldStats {
    pub iterations: AtomicU64,
    pub corrections: AtomicU64,
    pub within_tolerance: AtomicBool,
    pub cancel: AtomicBool,
}

impl HoldStats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            iterations: AtomicU64::new(0),
            corrections: AtomicU64::new(0),
            within_tolerance: AtomicBool::new(false),
            cancel: AtomicBool::new(false),
        })
    }
}

struct HoldTask {
    handle: JoinHandle<()>,
    stats: Arc<HoldStats>,
}

/// Position-hold controller for the two-motor arm joint.
///
/// At most one hold task runs at a time. `start` while the task slot is
/// occupied is a no-op that leaves the running task's target untouched; the
/// slot is released only by `stop`, even after a task that finished on its
/// own. The motor command interface is shared with manual commands and
/// nothing arbitrates between writers, so callers stop the task before
/// commanding the joint by hand.
pub struct HoldController {
    sensor: Arc<dyn PositionSensor>,
    motor_a: Arc<dyn JointMotor>,
    motor_b: Arc<dyn JointMotor>,
    tunables: HoldTunables,
    log: DiagnosticLog,
    metrics: LoopMetrics,
    events: HoldEvents,
    task: Mutex<Option<HoldTask>>,
}

impl HoldController {
    pub fn new(
        sensor: Arc<dyn PositionSensor>,
        motor_a: Arc<dyn JointMotor>,
        motor_b: Arc<dyn JointMotor>,
        tunables: HoldTunables,
    ) -> Self {
        Self {
            sensor,
            motor_a,
            motor_b,
            tunables,
            log: DiagnosticLog::new(1000),
            metrics: LoopMetrics::new(),
            events: HoldEvents::new(256),
            task: Mutex::new(None),
        }
    }

    /// Launches a hold toward `target`, or does nothing if the task slot is
    /// already occupied.
    pub fn start(&self, target: f64) {
        let mut slot = self.task.lock();
        if slot.is_some() {
            return;
        }

        let stats = HoldStats::new();
        let worker = HoldWorker {
            sensor: self.sensor.clone(),
            motor_a: self.motor_a.clone(),
            motor_b: self.motor_b.clone(),
            tunables: self.tunables.clone(),
            log: self.log.clone(),
            metrics: self.metrics.clone(),
            events: self.events.tx.clone(),
            stats: stats.clone(),
            target,
        };
        let handle = thread::spawn(move || worker.run());
        *slot = Some(HoldTask { handle, stats });
    }

    /// Cancels the running task, if any, and waits for it to wind down.
    /// Safe to call from idle, any number of times.
    pub fn stop(&self) {
        let task = self.task.lock().take();
        if let Some(task) = task {
            task.stats.cancel.store(true, Ordering::Relaxed);
            let _ = task.handle.join();
        }
    }

    /// Raw sensor reading, no filtering.
    pub fn position(&self) -> f64 {
        self.sensor.position()
    }

    pub fn is_holding(&self) -> bool {
        self.task.lock().is_some()
    }

    pub fn stats(&self) -> Option<Arc<HoldStats>> {
        self.task.lock().as_ref().map(|t| t.stats.clone())
    }

    pub fn events(&self) -> Arc<Receiver<HoldEvent>> {
        self.events.rx.clone()
    }

    pub fn metrics(&self) -> &LoopMetrics {
        &self.metrics
    }

    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    /// Drives the joint up at full configured power.
    pub fn raise(&self) {
        self.motor_a.command(self.tunables.max_output);
        self.motor_b.command(-self.tunables.max_output);
    }

    /// Drives the joint down at full configured power.
    pub fn lower(&self) {
        self.motor_a.command(self.tunables.min_output);
        self.motor_b.command(-self.tunables.min_output);
    }

    /// Brake-holds the joint at zero power.
    pub fn halt(&self) {
        self.motor_a.set_brake_mode(BrakeMode::Hold);
        self.motor_b.set_brake_mode(BrakeMode::Hold);
        self.motor_a.command(0.0);
        self.motor_b.command(0.0);
    }
}

struct HoldWorker {
    sensor: Arc<dyn PositionSensor>,
    motor_a: Arc<dyn JointMotor>,
    motor_b: Arc<dyn JointMotor>,
    tunables: HoldTunables,
    log: DiagnosticLog,
    metrics: LoopMetrics,
    events: Sender<HoldEvent>,
    stats: Arc<HoldStats>,
    target: f64,
}

impl HoldWorker {
    fn run(self) {
        let t = &self.tunables;
        self.motor_a.set_brake_mode(BrakeMode::Hold);
        self.motor_b.set_brake_mode(BrakeMode::Hold);

        let mut pid = HoldPid::new(t.kp, t.ki, t.kd);
        let interval = Duration::from_millis(t.sample_interval_ms);
        let mut last_output = 0.0;
        let mut announced_convergence = false;
        let mut iteration = 0u64;

        loop {
            // Cancellation is checked once per iteration so the task always
            // exits through the zero-power shutdown step.
            if self.stats.cancel.load(Ordering::Relaxed) {
                self.motor_a.command(0.0);
                self.motor_b.command(0.0);
                let _ = self.events.try_send(HoldEvent::Cancelled { last_output });
                self.log.write(format!(
                    "[HOLD] cancelled, motors zeroed (last output {:.1})",
                    last_output
                ));
                break;
            }

            let cycle_start = Instant::now();

            let mut position = self.sensor.position();
            if position < t.sensor_low_threshold {
                // Wrap artifact by assumption; a genuinely low reading
                // looks the same and is corrected the same way.
                self.sensor.set_position(t.sensor_recovery_value);
                self.stats.corrections.fetch_add(1, Ordering::Relaxed);
                let _ = self.events.try_send(HoldEvent::DiscontinuityCorrected {
                    raw: position,
                    corrected: t.sensor_recovery_value,
                });
                self.log.write(format!(
                    "[HOLD] sensor read {:.0} below {:.0}, rewrote to {:.0}",
                    position, t.sensor_low_threshold, t.sensor_recovery_value
                ));
                position = t.sensor_recovery_value;
            }

            let error = self.target - position;
            let output = pid.step(error).clamp(t.min_output, t.max_output);

            self.motor_a.command(output);
            self.motor_b.command(-output);
            last_output = output;

            iteration += 1;
            self.stats.iterations.fetch_add(1, Ordering::Relaxed);
            self.metrics.record_cycle(cycle_start.elapsed(), interval);

            let within = error.abs() <= t.tolerance;
            self.stats.within_tolerance.store(within, Ordering::Relaxed);
            if within {
                if !announced_convergence {
                    announced_convergence = true;
                    let _ = self.events.try_send(HoldEvent::Converged {
                        error,
                        holding: t.mode == HoldMode::HoldForever,
                    });
                }
                if t.mode == HoldMode::StopOnConverge {
                    self.motor_a.command(0.0);
                    self.motor_b.command(0.0);
                    self.log.write(format!(
                        "[HOLD] converged at error {:.1}, task finished",
                        error
                    ));
                    break;
                }
            } else {
                announced_convergence = false;
            }

            if iteration % 100 == 0 {
                self.log.write(format!(
                    "[HOLD] iteration {}: position {:.0}, error {:.1}, output {:.1}",
                    iteration, position, error, output
                ));
            }

            // Only suspension point in the loop.
            thread::sleep(interval);
        }
    }
}
