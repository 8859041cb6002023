//! Unit tests for device identification, self-test and calibration

use crate::common::{MockBusError, MockSensor, Operation};
use madgwick_orientation::{
    BiasVector, CalibrationProcedure, EngineConfig, Error, LifecycleState, OrientationEngine,
    SelfTestReport,
};

#[test]
fn test_initialize_reaches_active() {
    let mut sensor = MockSensor::new();
    let mut engine = OrientationEngine::default();

    engine.initialize(&mut sensor).unwrap();

    assert_eq!(engine.state(), LifecycleState::Active);
    assert!(engine.is_active());
    assert_eq!(
        engine.bias(),
        BiasVector::new([0.01, -0.02, 0.03], [1.0, -2.0, 0.5])
    );
    assert_eq!(
        sensor.operations(),
        vec![
            Operation::Identify,
            Operation::SelfTest,
            Operation::Calibrate,
        ]
    );
}

#[test]
fn test_wrong_device_id_halts_at_disconnected() {
    let mut sensor = MockSensor::new();
    sensor.set_device_id(0x71);
    let mut engine = OrientationEngine::default();

    let result = engine.initialize(&mut sensor);

    assert_eq!(result, Err(Error::InvalidDevice(0x71)));
    assert_eq!(engine.state(), LifecycleState::Disconnected);
    assert_eq!(sensor.count(Operation::SelfTest), 0);
}

#[test]
fn test_expected_device_id_is_configurable() {
    let mut sensor = MockSensor::new();
    sensor.set_device_id(0x71);
    let mut engine =
        OrientationEngine::new(EngineConfig::default().with_expected_device_id(0x71));

    engine.initialize(&mut sensor).unwrap();
    assert!(engine.is_active());
}

#[test]
fn test_failed_self_test_refuses_calibration() {
    let mut sensor = MockSensor::new();
    sensor.set_self_test([0.5, 0.5, 0.5, 0.5, 1.0, 0.5]);
    let mut engine = OrientationEngine::default();

    let result = engine.initialize(&mut sensor);

    assert_eq!(
        result,
        Err(Error::SelfTestFailed(SelfTestReport::from_array([
            0.5, 0.5, 0.5, 0.5, 1.0, 0.5
        ])))
    );
    assert_eq!(engine.state(), LifecycleState::Connected);
    assert_eq!(sensor.count(Operation::Calibrate), 0);
    assert_eq!(engine.bias(), BiasVector::FACTORY_DEFAULT);
}

#[test]
fn test_bus_failure_during_identify() {
    let mut sensor = MockSensor::new();
    sensor.fail_identify();
    let mut engine = OrientationEngine::default();

    assert_eq!(
        engine.initialize(&mut sensor),
        Err(Error::Bus(MockBusError))
    );
    assert_eq!(engine.state(), LifecycleState::Disconnected);
}

#[test]
fn test_failure_is_not_retried() {
    let mut sensor = MockSensor::new();
    sensor.set_self_test([2.0; 6]);
    let mut engine = OrientationEngine::default();

    assert!(engine.initialize(&mut sensor).is_err());
    assert_eq!(sensor.count(Operation::SelfTest), 1);

    // The caller may re-invoke once the condition is resolved.
    sensor.set_self_test([0.1; 6]);
    engine.initialize(&mut sensor).unwrap();
    assert!(engine.is_active());
}

#[test]
fn test_procedure_reports_state_reached() {
    let mut sensor = MockSensor::new();
    sensor.set_calibration(BiasVector::new([0.0; 3], [0.1, 0.2, 0.3]));
    let mut procedure = CalibrationProcedure::new(0x68);
    assert_eq!(procedure.state(), LifecycleState::Disconnected);

    let bias = procedure.run(&mut sensor).unwrap();
    assert_eq!(procedure.state(), LifecycleState::Calibrated);
    assert_eq!(bias.gyro, [0.1, 0.2, 0.3]);
}

#[test]
fn test_activate_with_bias_checks_identity() {
    let mut sensor = MockSensor::new();
    let mut engine = OrientationEngine::default();
    let bias = BiasVector::new([0.0; 3], [0.25; 3]);

    engine.activate_with_bias(&mut sensor, bias).unwrap();
    assert!(engine.is_active());
    assert_eq!(engine.bias(), bias);
    assert_eq!(sensor.operations(), vec![Operation::Identify]);

    let mut other = MockSensor::new();
    other.set_device_id(0x00);
    let mut engine = OrientationEngine::default();
    assert_eq!(
        engine.activate_with_bias(&mut other, bias),
        Err(Error::InvalidDevice(0x00))
    );
    assert!(!engine.is_active());
    assert_eq!(engine.bias(), BiasVector::FACTORY_DEFAULT);
}

#[test]
fn test_connect_only() {
    let mut sensor = MockSensor::new();
    let mut engine = OrientationEngine::default();

    engine.connect(&mut sensor).unwrap();
    assert_eq!(engine.state(), LifecycleState::Connected);
    assert_eq!(engine.update(&mut sensor, 0), Err(Error::NotActive));
}
