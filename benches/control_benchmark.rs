use criterion::{criterion_group, criterion_main, Criterion};

use arm_hold_control::control::pid::HoldPid;
use arm_hold_control::hardware::sim::{SimJoint, SimMotor, SimRotationSensor};
use arm_hold_control::hardware::JointMotor;

fn benchmark_pid_step(c: &mut Criterion) {
    let mut pid = HoldPid::new(0.4, 0.02, 0.2);
    c.bench_function("pid_step", |b| b.iter(|| pid.step(480.0)));
}

fn benchmark_sim_joint_step(c: &mut Criterion) {
    let sensor = SimRotationSensor::new(22_000.0);
    let motor = SimMotor::new();
    motor.command(50.0);
    let mut joint = SimJoint::new(sensor, motor, 42);
    c.bench_function("sim_joint_step", |b| b.iter(|| joint.step()));
}

criterion_group!(benches, benchmark_pid_step, benchmark_sim_joint_step);
criterion_main!(benches);
