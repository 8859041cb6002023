use crate::DegreesToRadians;
use minikalman::matrix::MatrixDataType;

/// Assumed gyroscope measurement error, in degrees per second.
pub const DEFAULT_GYRO_MEASUREMENT_ERROR: f32 = 40.0;

/// Assumed gyroscope measurement drift, in degrees per second per second.
pub const DEFAULT_GYRO_MEASUREMENT_DRIFT: f32 = 2.0;

/// The two free parameters of the filter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterParameters<T> {
    /// Weight of the accelerometer correction against gyroscope integration.
    pub beta: T,
    /// Aggressiveness of the gyroscope drift correction.
    pub zeta: T,
}

impl<T> FilterParameters<T> {
    /// Initializes a new [`FilterParameters`] instance from explicit gains.
    #[inline(always)]
    pub const fn new(beta: T, zeta: T) -> Self {
        Self { beta, zeta }
    }

    /// Derives `beta` and `zeta` from the gyroscope noise characteristics.
    ///
    /// ## Arguments
    /// * `measurement_error` - The gyroscope measurement error, in °/s.
    /// * `measurement_drift` - The gyroscope measurement drift, in °/s².
    ///
    /// Both gains are `sqrt(3/4)` times the respective value in radians.
    pub fn from_gyro_characteristics(measurement_error: T, measurement_drift: T) -> Self
    where
        T: MatrixDataType + DegreesToRadians + From<f32>,
    {
        let gain = T::from(0.75).square_root();
        Self {
            beta: gain * measurement_error.deg_to_rad(),
            zeta: gain * measurement_drift.deg_to_rad(),
        }
    }
}

impl<T> Default for FilterParameters<T>
where
    T: MatrixDataType + DegreesToRadians + From<f32>,
{
    fn default() -> Self {
        Self::from_gyro_characteristics(
            T::from(DEFAULT_GYRO_MEASUREMENT_ERROR),
            T::from(DEFAULT_GYRO_MEASUREMENT_DRIFT),
        )
    }
}

/// How the gyroscope bias correction carries over between updates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroBiasMode {
    /// The correction `gerr·Δt·ζ` is recomputed from scratch every update.
    #[default]
    Instantaneous,
    /// The correction is integrated into a running bias estimate.
    Accumulating,
}

/// The result of a single filter update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateOutcome {
    /// The quaternion was updated.
    Applied,
    /// The integration interval was zero, negative or not a number.
    SkippedZeroInterval,
    /// The accelerometer vector had zero length.
    SkippedZeroAcceleration,
    /// The objective function gradient was negligible (or non-finite).
    SkippedZeroGradient,
    /// The integrated quaternion had zero (or non-finite) length.
    SkippedDegenerateQuaternion,
}

impl UpdateOutcome {
    /// Returns `true` if the quaternion was updated.
    #[inline]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
