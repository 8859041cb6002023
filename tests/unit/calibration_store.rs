//! Unit tests for bias persistence

use crate::common::{create_active_engine, MockSensor};
use madgwick_orientation::{
    BiasVector, CalibrationStore, OrientationEngine, RamStorage, StoreError,
    CALIBRATION_BLOCK_SIZE, CALIBRATION_ERASED,
};

#[test]
fn test_round_trip_through_engine() {
    let (engine, _sensor) = create_active_engine();
    let mut store = CalibrationStore::new(RamStorage::<CALIBRATION_BLOCK_SIZE>::new()).unwrap();

    engine.save_calibration(&mut store).unwrap();

    let mut restored = OrientationEngine::default();
    assert!(restored.load_calibration(&mut store).unwrap());
    assert_eq!(restored.bias(), engine.bias());
    for axis in 0..3 {
        assert_eq!(
            restored.acc_bias(axis).to_bits(),
            engine.acc_bias(axis).to_bits()
        );
        assert_eq!(
            restored.gyro_bias(axis).to_bits(),
            engine.gyro_bias(axis).to_bits()
        );
    }
}

#[test]
fn test_cleared_store_yields_defaults() {
    let mut store = CalibrationStore::new(RamStorage::<64>::new()).unwrap();
    store.save(&BiasVector::new([9.0; 3], [9.0; 3])).unwrap();
    store.clear().unwrap();

    let mut engine = OrientationEngine::default();
    engine.set_gyro_bias(0, 42.0);
    assert!(!engine.load_calibration(&mut store).unwrap());
    assert_eq!(engine.bias(), BiasVector::FACTORY_DEFAULT);
    assert_eq!(engine.acc_bias(0), 0.005);
    assert_eq!(engine.gyro_bias(1), -0.5);

    let storage = store.release();
    let block = &storage.as_bytes()[..CALIBRATION_BLOCK_SIZE];
    assert!(block.iter().all(|&b| b == CALIBRATION_ERASED));
}

#[test]
fn test_restored_bias_activates_without_self_test() {
    let mut storage = RamStorage::<32>::new();
    {
        let (engine, _sensor) = create_active_engine();
        let mut store = CalibrationStore::new(&mut storage).unwrap();
        engine.save_calibration(&mut store).unwrap();
    }

    let mut store = CalibrationStore::new(&mut storage).unwrap();
    let stored = store.load().unwrap();
    assert!(stored.valid);

    let mut sensor = MockSensor::new();
    let mut engine = OrientationEngine::default();
    engine.activate_with_bias(&mut sensor, stored.bias).unwrap();
    assert!(engine.is_active());
    assert_eq!(engine.bias(), stored.bias);
}

#[test]
fn test_storage_too_small() {
    let result = CalibrationStore::new(RamStorage::<16>::new());
    assert!(matches!(result, Err(StoreError::OutOfBounds)));
}
