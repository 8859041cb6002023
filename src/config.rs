//! Runtime configuration of the orientation engine.

use crate::madgwick::{
    FilterParameters, GyroBiasMode, DEFAULT_GYRO_MEASUREMENT_DRIFT,
    DEFAULT_GYRO_MEASUREMENT_ERROR,
};

/// The device ID reported by the supported motion sensor family.
pub const DEFAULT_DEVICE_ID: u8 = 0x68;

/// Accelerometer full-scale range
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    #[default]
    G16 = 3,
}

impl AccelFullScale {
    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    /// Get the resolution in g per LSB
    #[must_use]
    pub fn resolution(self) -> f32 {
        f32::from(self.max_value()) / 32768.0
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±250 dps (most sensitive, least range)
    Dps250 = 0,
    /// ±500 dps
    Dps500 = 1,
    /// ±1000 dps
    Dps1000 = 2,
    /// ±2000 dps (least sensitive, most range)
    #[default]
    Dps2000 = 3,
}

impl GyroFullScale {
    /// Get the maximum value in degrees per second
    #[must_use]
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Dps250 => 250,
            Self::Dps500 => 500,
            Self::Dps1000 => 1000,
            Self::Dps2000 => 2000,
        }
    }

    /// Get the resolution in degrees per second per LSB
    #[must_use]
    pub fn resolution(self) -> f32 {
        f32::from(self.max_value()) / 32768.0
    }
}

/// Configuration of an [`OrientationEngine`](crate::OrientationEngine).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Accelerometer full-scale range
    pub accel_range: AccelFullScale,
    /// Gyroscope full-scale range
    pub gyro_range: GyroFullScale,
    /// The ID the sensor must report before any reading is trusted
    pub expected_device_id: u8,
    /// Gyroscope measurement error in °/s, determines `beta`
    pub gyro_measurement_error: f32,
    /// Gyroscope measurement drift in °/s², determines `zeta`
    pub gyro_measurement_drift: f32,
    /// Whether the filter's gyroscope bias correction accumulates
    pub bias_mode: GyroBiasMode,
    /// Subtract the stored gyroscope bias before filtering
    ///
    /// Off by default; the filter estimates gyroscope drift on its own.
    pub subtract_gyro_bias: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            accel_range: AccelFullScale::default(),
            gyro_range: GyroFullScale::default(),
            expected_device_id: DEFAULT_DEVICE_ID,
            gyro_measurement_error: DEFAULT_GYRO_MEASUREMENT_ERROR,
            gyro_measurement_drift: DEFAULT_GYRO_MEASUREMENT_DRIFT,
            bias_mode: GyroBiasMode::default(),
            subtract_gyro_bias: false,
        }
    }
}

impl EngineConfig {
    /// Sets the accelerometer full-scale range.
    #[must_use]
    pub const fn with_accel_range(mut self, range: AccelFullScale) -> Self {
        self.accel_range = range;
        self
    }

    /// Sets the gyroscope full-scale range.
    #[must_use]
    pub const fn with_gyro_range(mut self, range: GyroFullScale) -> Self {
        self.gyro_range = range;
        self
    }

    /// Sets the expected device ID.
    #[must_use]
    pub const fn with_expected_device_id(mut self, id: u8) -> Self {
        self.expected_device_id = id;
        self
    }

    /// Sets the gyroscope noise characteristics, in °/s and °/s².
    #[must_use]
    pub const fn with_gyro_characteristics(mut self, error: f32, drift: f32) -> Self {
        self.gyro_measurement_error = error;
        self.gyro_measurement_drift = drift;
        self
    }

    /// Sets the gyroscope bias mode.
    #[must_use]
    pub const fn with_bias_mode(mut self, mode: GyroBiasMode) -> Self {
        self.bias_mode = mode;
        self
    }

    /// Enables or disables subtraction of the stored gyroscope bias.
    #[must_use]
    pub const fn with_subtract_gyro_bias(mut self, enabled: bool) -> Self {
        self.subtract_gyro_bias = enabled;
        self
    }

    /// Derives the filter gains from the gyroscope characteristics.
    pub fn filter_parameters(&self) -> FilterParameters<f32> {
        FilterParameters::from_gyro_characteristics(
            self.gyro_measurement_error,
            self.gyro_measurement_drift,
        )
    }
}
