//! Common test utilities and mock implementations

pub mod test_utils;

pub use mock_sensor::{MockBusError, MockSensor, Operation};
pub use test_utils::{assert_float_eq, create_active_engine, rolled_gravity};
