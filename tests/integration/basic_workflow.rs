//! Integration tests for basic workflow scenarios

use crate::common::{assert_float_eq, create_active_engine, rolled_gravity, MockSensor};
use madgwick_orientation::madgwick::{GyroBiasMode, UpdateOutcome};
use madgwick_orientation::{
    CalibrationStore, CycleOutcome, EngineConfig, OrientationEngine, RamStorage,
};

/// Runs `steps` cycles at 100 Hz starting at `start_us`, returning the next timestamp.
fn run(engine: &mut OrientationEngine, sensor: &MockSensor, start_us: u32, steps: u32) -> u32 {
    let mut handle = sensor.clone();
    let mut now = start_us;
    for _ in 0..steps {
        engine.update(&mut handle, now).unwrap();
        now = now.wrapping_add(10_000);
    }
    now
}

#[test]
fn test_complete_initialization_workflow() {
    let mut sensor = MockSensor::new();
    let mut storage = RamStorage::<64>::new();

    // First boot: calibrate and persist.
    {
        let mut engine = OrientationEngine::default();
        engine.initialize(&mut sensor).unwrap();
        let mut store = CalibrationStore::new(&mut storage).unwrap();
        engine.save_calibration(&mut store).unwrap();
    }
    assert_eq!(storage.commits(), 1);

    // Second boot: restore and go straight to fusing samples.
    let mut store = CalibrationStore::new(&mut storage).unwrap();
    let mut engine = OrientationEngine::default();
    assert!(engine.load_calibration(&mut store).unwrap());
    let bias = engine.bias();
    engine.activate_with_bias(&mut sensor, bias).unwrap();

    let [x, y, z] = rolled_gravity(30.0);
    sensor.set_accel_data(x, y, z);
    run(&mut engine, &sensor, 0, 1000);

    assert_float_eq(engine.roll(), 30.0, 2.0);
    assert_float_eq(engine.pitch(), 0.0, 2.0);
}

#[test]
fn test_tracks_pitch() {
    let (mut engine, sensor) = create_active_engine();

    // Nose down by 20°: gravity moves toward -x in the body frame.
    let (sin, cos) = 20.0_f32.to_radians().sin_cos();
    let x = (-2048.0 * sin).round() as i16;
    let z = (2048.0 * cos).round() as i16;
    sensor.set_accel_data(x, 0, z);
    run(&mut engine, &sensor, 0, 1000);

    assert_float_eq(engine.pitch(), 20.0, 2.0);
    assert_float_eq(engine.roll(), 0.0, 2.0);
}

#[test]
fn test_timestamp_wraparound() {
    let (mut engine, sensor) = create_active_engine();
    let [x, y, z] = rolled_gravity(-40.0);
    sensor.set_accel_data(x, y, z);

    // The counter wraps a few cycles in.
    let start = u32::MAX - 25_000;
    let mut handle = sensor.clone();
    let mut now = start;
    let mut applied = 0;
    for _ in 0..1000 {
        if engine.update(&mut handle, now).unwrap()
            == CycleOutcome::Filtered(UpdateOutcome::Applied)
        {
            applied += 1;
        }
        now = now.wrapping_add(10_000);
    }

    assert!(applied > 900);
    assert_float_eq(engine.roll(), -40.0, 2.0);
}

#[test]
fn test_gyro_rate_is_integrated() {
    let config = EngineConfig::default().with_gyro_characteristics(0.0, 0.0);
    let mut sensor = MockSensor::new();
    let mut engine = OrientationEngine::new(config);
    engine.initialize(&mut sensor).unwrap();

    // Gravity off the current estimate keeps the gradient non-zero; with zero
    // gains it has no influence and only the angular rate is integrated.
    sensor.set_accel_data(0, 2048, 0);
    // 90 °/s around x at ±2000 °/s.
    sensor.set_gyro_data(1475, 0, 0);
    run(&mut engine, &sensor, 0, 51);

    let expected = 50.0 * 0.01 * 1475.0 * 2000.0 / 32768.0;
    assert_float_eq(engine.roll(), expected, 0.5);
}

#[test]
fn test_accumulating_bias_mode() {
    let config = EngineConfig::default().with_bias_mode(GyroBiasMode::Accumulating);
    let mut sensor = MockSensor::new();
    let mut engine = OrientationEngine::new(config);
    engine.initialize(&mut sensor).unwrap();
    assert_eq!(engine.filter().bias_mode(), GyroBiasMode::Accumulating);

    let [x, y, z] = rolled_gravity(15.0);
    sensor.set_accel_data(x, y, z);
    run(&mut engine, &sensor, 0, 1000);

    assert_float_eq(engine.roll(), 15.0, 3.0);
}
