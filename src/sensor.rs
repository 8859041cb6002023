//! The motion sensor capability consumed by the orientation engine.
//!
//! Register access and bus protocol stay behind this trait, so the engine can
//! be driven by a hardware driver or a simulated device alike.

use crate::calibration::{BiasVector, SelfTestReport};
use crate::conditioner::{RawAxes, RawSample, ScaleFactors};

/// Converts a raw temperature count into °C using the datasheet transfer function.
pub fn raw_to_celsius(raw: i16) -> f32 {
    f32::from(raw) / 340.0 + 36.53
}

/// A tri-axis accelerometer and gyroscope with a temperature sensor.
pub trait MotionSensor {
    /// The error type of the underlying transport.
    type Error;

    /// Reads the device ID byte.
    fn identify(&mut self) -> Result<u8, Self::Error>;

    /// Returns `true` when a new sample is available.
    fn is_ready(&mut self) -> Result<bool, Self::Error>;

    /// Reads the raw accelerometer counts.
    fn read_accel(&mut self) -> Result<RawAxes, Self::Error>;

    /// Reads the raw gyroscope counts.
    fn read_gyro(&mut self) -> Result<RawAxes, Self::Error>;

    /// Reads the raw temperature count.
    fn read_temperature(&mut self) -> Result<i16, Self::Error>;

    /// The accelerometer resolution in g per LSB.
    fn accel_resolution(&self) -> f32;

    /// The gyroscope resolution in °/s per LSB.
    fn gyro_resolution(&self) -> f32;

    /// Runs the built-in self-test and reports the deviation from factory
    /// trim per axis, in percent.
    fn self_test(&mut self) -> Result<SelfTestReport, Self::Error>;

    /// Averages stationary samples into accelerometer (g) and gyroscope (°/s) biases.
    fn calibrate(&mut self) -> Result<BiasVector, Self::Error>;

    /// Converts a raw temperature count into °C.
    fn temperature_celsius(&self, raw: i16) -> f32 {
        raw_to_celsius(raw)
    }

    /// The current scale factors.
    fn scale_factors(&self) -> ScaleFactors {
        ScaleFactors::new(self.accel_resolution(), self.gyro_resolution())
    }

    /// Reads accelerometer, gyroscope and temperature in one go.
    fn read_sample(&mut self) -> Result<RawSample, Self::Error> {
        Ok(RawSample {
            accel: self.read_accel()?,
            gyro: self.read_gyro()?,
            temperature: self.read_temperature()?,
        })
    }
}
