//! Tests for the small subsystem facades.

use arm_hold_control::hardware::sim::{SimMotor, SimPiston};
use arm_hold_control::hardware::BrakeMode;
use arm_hold_control::subsystems::clamp::MogoClamp;
use arm_hold_control::subsystems::doinker::Doinker;
use arm_hold_control::subsystems::intake::Intake;
use arm_hold_control::subsystems::ring_stopper::RingStopper;

#[test]
fn clamp_tracks_piston_state() {
    let piston = SimPiston::new();
    let mut clamp = MogoClamp::new(piston.clone());

    assert!(!clamp.is_clamped());
    clamp.clamp();
    assert!(clamp.is_clamped());
    assert!(piston.extended());
    clamp.unclamp();
    assert!(!clamp.is_clamped());
    assert!(!piston.extended());
}

#[test]
fn intake_scales_percent_to_power() {
    let motor = SimMotor::new();
    let mut intake = Intake::new(motor.clone());

    intake.intake(100.0);
    assert_eq!(motor.last_command(), Some(127.0));
    assert!(intake.is_running());

    intake.outtake(50.0);
    assert_eq!(motor.last_command(), Some(-63.5));

    intake.stop();
    assert_eq!(motor.last_command(), Some(0.0));
    assert_eq!(motor.brake_mode(), Some(BrakeMode::Coast));
    assert!(!intake.is_running());
}

#[test]
fn ring_stopper_and_doinker_track_position() {
    let stopper_piston = SimPiston::new();
    let mut stopper = RingStopper::new(stopper_piston.clone());
    stopper.lower();
    assert!(stopper.is_lowered());
    assert!(stopper_piston.extended());
    stopper.raise();
    assert!(!stopper.is_lowered());

    let doinker_piston = SimPiston::new();
    let mut doinker = Doinker::new(doinker_piston.clone());
    doinker.lower();
    assert!(doinker.is_lowered());
    doinker.raise();
    assert!(!doinker.is_lowered());
}
