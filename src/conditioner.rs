//! Conversion of raw sensor counts into physical units.

use crate::calibration::BiasVector;
use crate::config::{AccelFullScale, GyroFullScale};
use crate::{AccelerometerReading, DegreesToRadians, GyroscopeReading};

/// Tri-axis raw sensor counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawAxes {
    /// X-axis (raw)
    pub x: i16,
    /// Y-axis (raw)
    pub y: i16,
    /// Z-axis (raw)
    pub z: i16,
}

impl RawAxes {
    /// Initializes a new [`RawAxes`] instance.
    #[inline(always)]
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Returns the counts as an array.
    #[inline]
    pub const fn as_array(&self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}

/// A single raw read of the motion sensor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Accelerometer counts
    pub accel: RawAxes,
    /// Gyroscope counts
    pub gyro: RawAxes,
    /// Temperature count
    pub temperature: i16,
}

/// Per-sensor scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactors {
    /// g per LSB
    pub accel_resolution: f32,
    /// °/s per LSB
    pub gyro_resolution: f32,
}

impl ScaleFactors {
    /// Initializes a new [`ScaleFactors`] instance.
    pub const fn new(accel_resolution: f32, gyro_resolution: f32) -> Self {
        Self {
            accel_resolution,
            gyro_resolution,
        }
    }

    /// Derives the scale factors from the configured full-scale ranges.
    pub fn from_ranges(accel: AccelFullScale, gyro: GyroFullScale) -> Self {
        Self::new(accel.resolution(), gyro.resolution())
    }
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self::from_ranges(AccelFullScale::default(), GyroFullScale::default())
    }
}

/// A sample converted into physical units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalSample {
    /// Acceleration in g
    pub accel_g: [f32; 3],
    /// Angular rate in °/s
    pub gyro_dps: [f32; 3],
    /// Die temperature in °C
    pub temperature_c: f32,
}

impl PhysicalSample {
    /// The angular rates in radians per second.
    pub fn gyro_rad_per_sec(&self) -> [f32; 3] {
        self.gyro_dps.map(|rate| rate.deg_to_rad())
    }

    /// The acceleration as filter input.
    pub fn accelerometer(&self) -> AccelerometerReading<f32> {
        AccelerometerReading::from_array(self.accel_g)
    }

    /// The angular rates as filter input.
    pub fn gyroscope(&self) -> GyroscopeReading<f32> {
        let [x, y, z] = self.gyro_rad_per_sec();
        GyroscopeReading::new(x, y, z)
    }
}

/// Converts raw samples into [`PhysicalSample`]s.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleConditioner {
    subtract_gyro_bias: bool,
}

impl SampleConditioner {
    /// Initializes a new [`SampleConditioner`].
    ///
    /// ## Arguments
    /// * `subtract_gyro_bias` - Whether the gyroscope bias is removed before filtering.
    pub const fn new(subtract_gyro_bias: bool) -> Self {
        Self { subtract_gyro_bias }
    }

    /// Converts a raw sample into physical units.
    ///
    /// The accelerometer bias is never subtracted; the filter only uses the
    /// direction of the acceleration vector. The gyroscope bias is removed
    /// in °/s only when enabled.
    pub fn condition(
        &self,
        raw: &RawSample,
        scale: &ScaleFactors,
        bias: &BiasVector,
        temperature_c: f32,
    ) -> PhysicalSample {
        let accel_g = raw
            .accel
            .as_array()
            .map(|count| f32::from(count) * scale.accel_resolution);

        let mut gyro_dps = raw
            .gyro
            .as_array()
            .map(|count| f32::from(count) * scale.gyro_resolution);

        if self.subtract_gyro_bias {
            for (rate, bias) in gyro_dps.iter_mut().zip(bias.gyro) {
                *rate -= bias;
            }
        }

        PhysicalSample {
            accel_g,
            gyro_dps,
            temperature_c,
        }
    }
}
