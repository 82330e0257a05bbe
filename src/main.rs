use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use arm_hold_control::analysis::render_latency_chart;
use arm_hold_control::config::load_config;
use arm_hold_control::control::hold::HoldController;
use arm_hold_control::hardware::sim::{SimJoint, SimMotor, SimPiston, SimRotationSensor};
use arm_hold_control::subsystems::clamp::MogoClamp;

fn main() {
    println!("===========================================");
    println!("Arm Position-Hold Demonstration");
    println!("===========================================\n");

    let tunables = load_config("config/arm_hold.toml");
    println!("[SETUP] tunables: {:?}\n", tunables);

    // Simulated joint: sensor starts above the wrap guard threshold.
    let sensor = SimRotationSensor::new(22_000.0);
    let motor_a = SimMotor::new();
    let motor_b = SimMotor::new();
    let mut joint = SimJoint::new(sensor.clone(), motor_a.clone(), 42);

    let controller = HoldController::new(
        sensor.clone(),
        motor_a.clone(),
        motor_b.clone(),
        tunables,
    );
    let events = controller.events();

    let target = 30_000.0;
    println!("[HOLD] starting hold toward {:.0} ticks", target);
    controller.start(target);

    // Drive the plant while the hold task runs.
    for _ in 0..300 {
        joint.step();
        thread::sleep(Duration::from_millis(10));
    }

    while let Ok(event) = events.try_recv() {
        println!("[EVENT] {:?}", event);
    }

    let stats = controller.stats();
    if let Some(stats) = &stats {
        println!(
            "[HOLD] iterations: {}, corrections: {}, within tolerance: {}",
            stats.iterations.load(Ordering::Relaxed),
            stats.corrections.load(Ordering::Relaxed),
            stats.within_tolerance.load(Ordering::Relaxed)
        );
    }

    controller.stop();
    println!("[HOLD] stopped; final position {:.0}\n", controller.position());

    let log_lines = controller.log().read_all();
    println!("=== Last Diagnostics ===");
    for line in log_lines.iter().skip(log_lines.len().saturating_sub(5)) {
        println!("{}", line);
    }

    let report = controller.metrics().report();
    println!("\n=== Loop Timing ===");
    println!("Cycle P50: {:?}, P99: {:?}", report.cycle_p50, report.cycle_p99);
    println!("Jitter P99: {:?}", report.jitter_p99);
    println!("Missed deadlines: {}", report.missed_deadlines);

    match render_latency_chart(&report, "hold_latency.png") {
        Ok(()) => println!("[CHART] wrote hold_latency.png"),
        Err(e) => println!("[CHART] rendering failed: {}", e),
    }

    // Quick pass over a pneumatic subsystem on the same seams.
    let piston = SimPiston::new();
    let mut clamp = MogoClamp::new(piston);
    clamp.clamp();
    println!("\n[CLAMP] engaged: {}", clamp.is_clamped());
    clamp.unclamp();
    println!("[CLAMP] engaged: {}", clamp.is_clamped());
}
