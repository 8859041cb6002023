//! # Madgwick Orientation
//!
//! Estimates the orientation of an inertial measurement unit from
//! accelerometer and gyroscope samples using Sebastian Madgwick's
//! gradient-descent filter.
//!
//! The [`madgwick::MadgwickFilter`] is generic over its scalar type and can be
//! used on its own. The [`OrientationEngine`] wraps it with sensor polling,
//! conversion of raw counts into physical units, calibration and Tait-Bryan
//! angle extraction on top of a [`MotionSensor`].

// Enable no_std mode.
#![cfg_attr(not(feature = "std"), no_std)]
// Ensure allow(unsafe_code) / forbid(unsafe_code) markers.
#![cfg_attr(feature = "unsafe", allow(unsafe_code))]
#![cfg_attr(not(feature = "unsafe"), forbid(unsafe_code))]
// Only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod accelerometer_reading;
mod calibration;
mod conditioner;
mod config;
mod engine;
mod error;
mod euler_angles;
mod gyroscope_bias;
mod gyroscope_reading;
mod macros;
pub mod madgwick;
mod num_traits;
mod quaternion;
mod sensor;
mod store;
mod timing;
mod vector3;

pub use crate::accelerometer_reading::AccelerometerReading;
pub use crate::calibration::{
    BiasVector, CalibrationProcedure, LifecycleState, SelfTestReport, SELF_TEST_THRESHOLD,
};
pub use crate::conditioner::{PhysicalSample, RawAxes, RawSample, SampleConditioner, ScaleFactors};
pub use crate::config::{AccelFullScale, EngineConfig, GyroFullScale, DEFAULT_DEVICE_ID};
pub use crate::engine::{CycleOutcome, OrientationEngine, OrientationSnapshot};
pub use crate::error::{Error, StoreError};
pub use crate::euler_angles::EulerAngles;
pub use crate::gyroscope_bias::GyroscopeBias;
pub use crate::gyroscope_reading::GyroscopeReading;
pub use crate::quaternion::{extract_euler_angles, Quaternion};
pub use crate::sensor::{raw_to_celsius, MotionSensor};
pub use crate::store::{
    CalibrationStore, NonVolatileStorage, OutOfRange, RamStorage, StoredCalibration,
    CALIBRATION_BLOCK_SIZE, CALIBRATION_ERASED, CALIBRATION_VALID,
};
pub use crate::timing::DeltaTimer;
pub use crate::vector3::Vector3;

pub use crate::num_traits::*;
