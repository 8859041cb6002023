//! Madgwick's gradient-descent orientation filter for accelerometer and gyroscope data.
//!
//! Every update performs a single gradient-descent step that pulls the
//! gyroscope-integrated orientation toward the orientation implied by the
//! measured direction of gravity. It is O(1), allocation-free and performs no
//! matrix inversion.
//!
//! ## References
//! - S. O. H. Madgwick, "An efficient orientation filter for inertial and
//!   inertial/magnetic sensor arrays", 2010.

mod types;

pub use types::*;

use crate::gyroscope_bias::GyroscopeBias;
use crate::quaternion::Quaternion;
use crate::vector3::Vector3;
use crate::{AccelerometerReading, Epsilon, GyroscopeReading, IsFinite, IsNaN};
use minikalman::matrix::MatrixDataType;

/// Gradient norms up to this multiple of the machine epsilon count as zero.
const GRADIENT_FLOOR_EPSILONS: f32 = 64.0;

/// A 6-DoF Madgwick orientation filter with generic type `T`.
pub struct MadgwickFilter<T> {
    /// The current orientation estimate.
    quaternion: Quaternion<T>,
    /// The filter gains.
    parameters: FilterParameters<T>,
    /// Whether the gyroscope bias correction accumulates.
    bias_mode: GyroBiasMode,
    /// The bias correction applied during the last successful update, in rad/s.
    bias: GyroscopeBias<T>,
}

impl<T> MadgwickFilter<T> {
    /// Initializes a new instance of the [`MadgwickFilter`] struct at the identity orientation.
    ///
    /// ## Arguments
    /// * `parameters` - The `beta` and `zeta` gains.
    /// * `bias_mode` - Whether the gyroscope bias correction accumulates across updates.
    pub fn new(parameters: FilterParameters<T>, bias_mode: GyroBiasMode) -> Self
    where
        T: MatrixDataType,
    {
        Self {
            quaternion: Quaternion::new(T::one(), T::zero(), T::zero(), T::zero()),
            parameters,
            bias_mode,
            bias: GyroscopeBias::new(T::zero(), T::zero(), T::zero()),
        }
    }

    /// Initializes a new instance of the [`MadgwickFilter`] struct at a given orientation.
    ///
    /// Returns `None` if `orientation` cannot be normalized.
    pub fn with_orientation(
        parameters: FilterParameters<T>,
        bias_mode: GyroBiasMode,
        orientation: Quaternion<T>,
    ) -> Option<Self>
    where
        T: MatrixDataType + PartialEq + IsFinite,
    {
        let mut filter = Self::new(parameters, bias_mode);
        filter.quaternion = orientation.try_normalized()?;
        Some(filter)
    }

    /// Gets the current orientation estimate.
    #[inline]
    pub fn quaternion(&self) -> Quaternion<T>
    where
        T: Copy,
    {
        self.quaternion
    }

    /// Gets the filter gains.
    #[inline]
    pub fn parameters(&self) -> FilterParameters<T>
    where
        T: Copy,
    {
        self.parameters
    }

    /// Gets the gyroscope bias mode.
    #[inline]
    pub fn bias_mode(&self) -> GyroBiasMode {
        self.bias_mode
    }

    /// Gets the gyroscope bias correction applied during the last successful update, in rad/s.
    ///
    /// In [`GyroBiasMode::Accumulating`] mode this is the running bias estimate.
    #[inline]
    pub fn last_bias_correction(&self) -> GyroscopeBias<T>
    where
        T: Copy,
    {
        self.bias
    }

    /// Clears the gyroscope bias estimate.
    pub fn reset_bias_estimate(&mut self)
    where
        T: MatrixDataType,
    {
        self.bias = GyroscopeBias::new(T::zero(), T::zero(), T::zero());
    }

    /// Restores the identity orientation and clears the gyroscope bias estimate.
    pub fn reset(&mut self)
    where
        T: MatrixDataType,
    {
        self.quaternion = Quaternion::new(T::one(), T::zero(), T::zero(), T::zero());
        self.reset_bias_estimate();
    }
}

impl<T> MadgwickFilter<T> {
    /// Performs a single filter update.
    ///
    /// ## Arguments
    /// * `accelerometer` - The accelerometer reading; only its direction is used.
    /// * `gyroscope` - The angular rates, in radians per second.
    /// * `delta_t` - The integration interval, in seconds.
    ///
    /// Any outcome other than [`UpdateOutcome::Applied`] leaves the filter state
    /// untouched.
    ///
    /// A cycle whose accelerometer reading matches the estimate is skipped as a
    /// whole, gyroscope integration included. A noise-free, perfectly level
    /// sensor rotating only about the vertical axis therefore never accumulates
    /// yaw; simulated data should carry some tilt or noise.
    pub fn update(
        &mut self,
        accelerometer: &AccelerometerReading<T>,
        gyroscope: &GyroscopeReading<T>,
        delta_t: T,
    ) -> UpdateOutcome
    where
        T: MatrixDataType + PartialOrd + IsFinite + IsNaN + Epsilon + From<f32>,
    {
        let zero = T::zero();

        if delta_t.is_nan() || delta_t <= zero {
            return UpdateOutcome::SkippedZeroInterval;
        }

        let Some(a) = Vector3::from(accelerometer).try_normalized() else {
            return UpdateOutcome::SkippedZeroAcceleration;
        };

        let one = T::one();
        let two = one + one;
        let half = two.recip();

        let Quaternion {
            w: q1,
            x: q2,
            y: q3,
            z: q4,
        } = self.quaternion;

        let half_q1 = half * q1;
        let half_q2 = half * q2;
        let half_q3 = half * q3;
        let half_q4 = half * q4;
        let two_q1 = two * q1;
        let two_q2 = two * q2;
        let two_q3 = two * q3;
        let two_q4 = two * q4;

        // Objective function: predicted minus measured direction of gravity.
        let f1 = two_q2 * q4 - two_q1 * q3 - a.x;
        let f2 = two_q1 * q2 + two_q3 * q4 - a.y;
        let f3 = one - two_q2 * q2 - two_q3 * q3 - a.z;

        // Jacobian terms, shared between rows by symmetry.
        let j_11or24 = two_q3;
        let j_12or23 = two_q4;
        let j_13or22 = two_q1;
        let j_14or21 = two_q2;
        let j_32 = two * j_14or21;
        let j_33 = two * j_11or24;

        // Gradient Jᵀf.
        let hat_dot = Quaternion::new(
            j_14or21 * f2 - j_11or24 * f1,
            j_12or23 * f1 + j_13or22 * f2 - j_32 * f3,
            j_12or23 * f2 - j_33 * f3 - j_13or22 * f1,
            j_14or21 * f1 + j_11or24 * f2,
        );

        // Rounding leaves a residual of a few ε at an exact equilibrium.
        let gradient_norm = hat_dot.norm();
        let gradient_floor = T::epsilon() * T::from(GRADIENT_FLOOR_EPSILONS);
        if !gradient_norm.is_finite() || gradient_norm <= gradient_floor {
            return UpdateOutcome::SkippedZeroGradient;
        }
        let hat_dot = hat_dot * gradient_norm.recip();

        // Gyroscope bias error implied by the correction direction.
        let gerr_x = two_q1 * hat_dot.x - two_q2 * hat_dot.w - two_q3 * hat_dot.z
            + two_q4 * hat_dot.y;
        let gerr_y = two_q1 * hat_dot.y + two_q2 * hat_dot.z - two_q3 * hat_dot.w
            - two_q4 * hat_dot.x;
        let gerr_z = two_q1 * hat_dot.z - two_q2 * hat_dot.y + two_q3 * hat_dot.x
            - two_q4 * hat_dot.w;

        let bias_step =
            GyroscopeBias::new(gerr_x, gerr_y, gerr_z) * (delta_t * self.parameters.zeta);
        let bias = match self.bias_mode {
            GyroBiasMode::Instantaneous => bias_step,
            GyroBiasMode::Accumulating => self.bias + bias_step,
        };

        let GyroscopeReading {
            omega_x: gx,
            omega_y: gy,
            omega_z: gz,
        } = *gyroscope - bias;

        // Rate of change of the quaternion from the angular rates.
        let q_dot1 = zero - half_q2 * gx - half_q3 * gy - half_q4 * gz;
        let q_dot2 = half_q1 * gx + half_q3 * gz - half_q4 * gy;
        let q_dot3 = half_q1 * gy - half_q2 * gz + half_q4 * gx;
        let q_dot4 = half_q1 * gz + half_q2 * gy - half_q3 * gx;

        let beta = self.parameters.beta;
        let integrated = Quaternion::new(
            q1 + (q_dot1 - beta * hat_dot.w) * delta_t,
            q2 + (q_dot2 - beta * hat_dot.x) * delta_t,
            q3 + (q_dot3 - beta * hat_dot.y) * delta_t,
            q4 + (q_dot4 - beta * hat_dot.z) * delta_t,
        );

        let Some(quaternion) = integrated.try_normalized() else {
            return UpdateOutcome::SkippedDegenerateQuaternion;
        };

        self.quaternion = quaternion;
        self.bias = bias;
        UpdateOutcome::Applied
    }
}
