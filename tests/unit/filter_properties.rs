//! Unit tests for filter and angle extraction properties

use madgwick_orientation::madgwick::{
    FilterParameters, GyroBiasMode, MadgwickFilter, UpdateOutcome,
};
use madgwick_orientation::{
    extract_euler_angles, AccelerometerReading, GyroscopeReading, Quaternion,
};

fn axis_angle(axis: [f64; 3], angle_deg: f64) -> Quaternion<f64> {
    let (sin, cos) = (angle_deg.to_radians() * 0.5).sin_cos();
    Quaternion::new(cos, axis[0] * sin, axis[1] * sin, axis[2] * sin)
}

#[test]
fn test_identity_extracts_to_zero() {
    let angles = extract_euler_angles(&Quaternion::<f32>::new(1.0, 0.0, 0.0, 0.0));
    assert_eq!((angles.roll, angles.pitch, angles.yaw), (0.0, 0.0, 0.0));
}

#[test]
fn test_angles_are_finite_and_bounded() {
    let mut seed = 0x2545_f491_u32;
    let mut next = || {
        // xorshift32
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        f64::from(seed) / f64::from(u32::MAX) * 2.0 - 1.0
    };

    for _ in 0..2000 {
        let q = Quaternion::new(next(), next(), next(), next());
        let Some(q) = q.try_normalized() else {
            continue;
        };

        let angles = q.to_euler_angles();
        assert!(angles.is_finite(), "{q:?} -> {angles:?}");
        assert!((-90.0..=90.0).contains(&angles.pitch));
        assert!(angles.yaw > -180.0 && angles.yaw <= 180.0);
        assert!(angles.roll > -180.0 && angles.roll <= 180.0);
    }
}

#[test]
fn test_zero_acceleration_is_bit_exact_no_op() {
    let start = axis_angle([0.0, 0.6, 0.8], 70.0);
    let mut filter = MadgwickFilter::with_orientation(
        FilterParameters::default(),
        GyroBiasMode::Accumulating,
        start,
    )
    .unwrap();
    let before = filter.quaternion();
    let bias_before = filter.last_bias_correction();

    let outcome = filter.update(
        &AccelerometerReading::new(0.0, 0.0, 0.0),
        &GyroscopeReading::new(1.0, 2.0, 3.0),
        0.01,
    );

    assert_eq!(outcome, UpdateOutcome::SkippedZeroAcceleration);
    let after = filter.quaternion();
    assert_eq!(after.w.to_bits(), before.w.to_bits());
    assert_eq!(after.x.to_bits(), before.x.to_bits());
    assert_eq!(after.y.to_bits(), before.y.to_bits());
    assert_eq!(after.z.to_bits(), before.z.to_bits());
    assert_eq!(filter.last_bias_correction(), bias_before);
}

#[test]
fn test_fixed_point_at_equilibrium() {
    for (axis, angle) in [
        ([1.0, 0.0, 0.0], 0.0),
        ([0.0, 0.0, 1.0], 135.0),
        ([1.0, 0.0, 0.0], 180.0),
    ] {
        let orientation = axis_angle(axis, angle);
        let gravity = orientation.gravity_direction();
        let mut filter = MadgwickFilter::with_orientation(
            FilterParameters::default(),
            GyroBiasMode::Instantaneous,
            orientation,
        )
        .unwrap();
        let start = filter.quaternion();

        filter.update(
            &AccelerometerReading::new(gravity.x, gravity.y, gravity.z),
            &GyroscopeReading::new(0.0, 0.0, 0.0),
            0.01,
        );

        let q = filter.quaternion();
        for (a, b) in [
            (q.w, start.w),
            (q.x, start.x),
            (q.y, start.y),
            (q.z, start.z),
        ] {
            assert!((a - b).abs() <= 4.0 * f64::EPSILON, "{q:?} != {start:?}");
        }
    }
}

#[test]
fn test_fixed_point_for_generic_orientations() {
    let mut seed = 0x9e37_79b9_u32;
    let mut next = || {
        // xorshift32
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        f64::from(seed) / f64::from(u32::MAX) * 2.0 - 1.0
    };

    for _ in 0..500 {
        let axis = [next(), next(), next()];
        let norm = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if norm < 1e-3 {
            continue;
        }
        let axis = [axis[0] / norm, axis[1] / norm, axis[2] / norm];
        let orientation = axis_angle(axis, 180.0 * next());

        let mut filter = MadgwickFilter::with_orientation(
            FilterParameters::default(),
            GyroBiasMode::Accumulating,
            orientation,
        )
        .unwrap();
        let start = filter.quaternion();
        let gravity = start.gravity_direction();

        for _ in 0..10 {
            let outcome = filter.update(
                &AccelerometerReading::new(gravity.x, gravity.y, gravity.z),
                &GyroscopeReading::new(0.0, 0.0, 0.0),
                0.01,
            );
            assert_eq!(outcome, UpdateOutcome::SkippedZeroGradient, "{start:?}");
        }

        assert_eq!(filter.quaternion(), start);
        assert_eq!(filter.last_bias_correction().omega_x, 0.0);
    }
}

#[test]
fn test_fixed_point_for_generic_orientations_f32() {
    for angle in [10.0_f32, 30.0, 47.0, 73.0, 121.0, -58.0] {
        let (sin, cos) = (angle.to_radians() * 0.5).sin_cos();
        let axis = core::f32::consts::FRAC_1_SQRT_2;
        let orientation = Quaternion::new(cos, axis * sin, axis * sin, 0.0);

        let mut filter = MadgwickFilter::with_orientation(
            FilterParameters::default(),
            GyroBiasMode::Instantaneous,
            orientation,
        )
        .unwrap();
        let start = filter.quaternion();
        let gravity = start.gravity_direction();

        let outcome = filter.update(
            &AccelerometerReading::new(gravity.x, gravity.y, gravity.z),
            &GyroscopeReading::new(0.0, 0.0, 0.0),
            0.01,
        );

        assert_eq!(
            outcome,
            UpdateOutcome::SkippedZeroGradient,
            "angle = {angle}"
        );
        assert_eq!(filter.quaternion(), start);
    }
}

#[test]
fn test_unit_norm_after_updates() {
    let mut filter =
        MadgwickFilter::<f32>::new(FilterParameters::default(), GyroBiasMode::Instantaneous);

    for step in 0..2000 {
        let t = step as f32 * 0.005;
        let outcome = filter.update(
            &AccelerometerReading::new(0.4 * (3.0 * t).sin(), 0.7, 0.5 + 0.1 * t.cos()),
            &GyroscopeReading::new(2.0 * t.cos(), -1.0, 4.0 * (0.5 * t).sin()),
            0.005,
        );

        if outcome.is_applied() {
            let norm = filter.quaternion().norm();
            assert!((norm - 1.0).abs() < 1e-5, "norm = {norm}");
        }
    }
}

#[test]
fn test_gyro_bias_modes_differ() {
    let accel = AccelerometerReading::new(0.3, -0.4, 0.85);
    let gyro = GyroscopeReading::new(0.0, 0.0, 0.0);

    let parameters = FilterParameters::<f32>::default();
    let mut instantaneous = MadgwickFilter::new(parameters, GyroBiasMode::Instantaneous);
    let mut accumulating = MadgwickFilter::new(parameters, GyroBiasMode::Accumulating);

    // The first step is identical in both modes.
    instantaneous.update(&accel, &gyro, 0.01);
    accumulating.update(&accel, &gyro, 0.01);
    assert_eq!(instantaneous.quaternion(), accumulating.quaternion());

    for _ in 0..50 {
        instantaneous.update(&accel, &gyro, 0.01);
        accumulating.update(&accel, &gyro, 0.01);
    }
    assert_ne!(instantaneous.quaternion(), accumulating.quaternion());
}

#[test]
fn test_reset_restores_identity() {
    let mut filter =
        MadgwickFilter::<f32>::new(FilterParameters::default(), GyroBiasMode::Accumulating);
    filter.update(
        &AccelerometerReading::new(0.0, 1.0, 0.0),
        &GyroscopeReading::new(0.1, 0.2, 0.3),
        0.01,
    );
    assert_ne!(filter.quaternion(), Quaternion::identity());

    filter.reset();
    assert_eq!(filter.quaternion(), Quaternion::identity());
    assert_eq!(filter.last_bias_correction().omega_x, 0.0);
}
