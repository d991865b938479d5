use footfall_core::gait::{MAX_STRIDE_DURATION, MIN_STRIDE_DURATION, SPEED_FLOOR};
use footfall_core::{BalanceSmoothing, GaitParameters};

#[test]
fn stride_duration_at_reference_speed_scales_with_multiplier() {
    let gait = GaitParameters {
        reference_speed: 150.0,
        stride_length_multiplier: 0.5,
        ..GaitParameters::default()
    };
    assert_eq!(gait.stride_duration(150.0), 0.25);
}

#[test]
fn stride_duration_is_non_increasing_and_clamped() {
    let gait = GaitParameters::default();
    let mut previous = f32::INFINITY;
    for step in 0..=2_000 {
        let speed = step as f32 * 2.5;
        let duration = gait.stride_duration(speed);
        assert!(
            (MIN_STRIDE_DURATION..=MAX_STRIDE_DURATION).contains(&duration),
            "speed {speed} gave {duration}"
        );
        assert!(duration <= previous, "speed {speed} increased stride duration");
        previous = duration;
    }
}

#[test]
fn stride_duration_hits_both_clamps() {
    let gait = GaitParameters::default();
    assert_eq!(gait.stride_duration(0.0), MAX_STRIDE_DURATION);
    assert_eq!(gait.stride_duration(-20.0), MAX_STRIDE_DURATION);
    assert_eq!(gait.stride_duration(f32::NAN), MAX_STRIDE_DURATION);
    assert_eq!(gait.stride_duration(1.0e6), MIN_STRIDE_DURATION);
}

#[test]
fn sanitized_clamps_multipliers_and_speed() {
    let gait = GaitParameters {
        reference_speed: -5.0,
        stride_length_multiplier: 10.0,
        lift_height_multiplier: 0.0,
        step_height: -3.0,
        balance_smoothing: f32::NAN,
        smoothing_mode: BalanceSmoothing::PerTick,
    }
    .sanitized();

    assert_eq!(gait.reference_speed, SPEED_FLOOR);
    assert_eq!(gait.stride_length_multiplier, 3.0);
    assert_eq!(gait.lift_height_multiplier, 0.1);
    assert_eq!(gait.step_height, 0.0);
    assert_eq!(gait.balance_smoothing, GaitParameters::default().balance_smoothing);
    assert_eq!(gait.smoothing_mode, BalanceSmoothing::PerTick);
}

#[test]
fn sanitized_leaves_valid_parameters_alone() {
    let gait = GaitParameters {
        reference_speed: 220.0,
        stride_length_multiplier: 1.5,
        lift_height_multiplier: 2.0,
        step_height: 30.0,
        balance_smoothing: 0.5,
        smoothing_mode: BalanceSmoothing::TimeScaled,
    };
    assert_eq!(gait.sanitized(), gait);
}

#[test]
fn step_threshold_follows_reference_speed_and_stride() {
    let gait = GaitParameters::default();
    let threshold = gait.step_threshold(0.4);
    assert!((threshold - 150.0 * 0.4 * 0.1).abs() < 1e-4);
}
