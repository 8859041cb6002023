//! Test utilities and helper functions

use crate::common::mock_sensor::MockSensor;
use madgwick_orientation::{EngineConfig, OrientationEngine};

/// Create an initialized engine for testing
/// Returns (engine, sensor) where sensor is a clone that shares state with the one the engine used
pub fn create_active_engine() -> (OrientationEngine, MockSensor) {
    let sensor = MockSensor::new();
    let mut engine = OrientationEngine::new(EngineConfig::default());
    let mut handle = sensor.clone();
    engine
        .initialize(&mut handle)
        .expect("Failed to initialize engine");
    (engine, sensor)
}

/// Assert that two floating point values are approximately equal
pub fn assert_float_eq(a: f32, b: f32, epsilon: f32) {
    let diff = (a - b).abs();
    assert!(
        diff < epsilon,
        "Values not equal within epsilon: {} vs {} (diff: {}, epsilon: {})",
        a,
        b,
        diff,
        epsilon
    );
}

/// Raw counts of a 1 g reading tilted by `roll_deg` around the x-axis at ±16 g
pub fn rolled_gravity(roll_deg: f32) -> [i16; 3] {
    let (sin, cos) = roll_deg.to_radians().sin_cos();
    [
        0,
        (2048.0 * sin).round() as i16,
        (2048.0 * cos).round() as i16,
    ]
}
