use crate::euler_angles::EulerAngles;
use crate::impl_standard_traits;
use crate::vector3::Vector3;
use crate::{ArcSin, ArcTan, DegreeRange, IsFinite, RadiansToDegrees};
use minikalman::matrix::MatrixDataType;
use num_traits::{One, Zero};

/// An orientation quaternion in (w, x, y, z) order.
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct Quaternion<T> {
    /// The scalar part.
    pub w: T,
    /// The first vector component.
    pub x: T,
    /// The second vector component.
    pub y: T,
    /// The third vector component.
    pub z: T,
}

impl<T> Quaternion<T> {
    /// Initializes a new [`Quaternion`] instance.
    #[inline(always)]
    pub const fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation `(1, 0, 0, 0)`.
    #[inline]
    pub fn identity() -> Self
    where
        T: Zero + One,
    {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Returns the component at `index` in (w, x, y, z) order.
    #[inline]
    pub fn component(&self, index: usize) -> Option<T>
    where
        T: Copy,
    {
        match index {
            0 => Some(self.w),
            1 => Some(self.x),
            2 => Some(self.y),
            3 => Some(self.z),
            _ => None,
        }
    }

    /// Calculates the squared norm.
    #[inline]
    pub fn norm_sq(&self) -> T
    where
        T: MatrixDataType,
    {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Calculates the norm.
    #[inline]
    pub fn norm(&self) -> T
    where
        T: MatrixDataType,
    {
        self.norm_sq().square_root()
    }

    /// Returns the quaternion scaled to unit length.
    ///
    /// Returns `None` if the norm is zero or not finite, so a degenerate
    /// quaternion can never replace a valid one.
    pub fn try_normalized(&self) -> Option<Self>
    where
        T: MatrixDataType + PartialEq + IsFinite,
    {
        let norm = self.norm();
        if norm == T::zero() || !norm.is_finite() {
            return None;
        }

        let norm_inv = norm.recip();
        let normalized = Self {
            w: self.w * norm_inv,
            x: self.x * norm_inv,
            y: self.y * norm_inv,
            z: self.z * norm_inv,
        };

        if normalized.is_finite() {
            Some(normalized)
        } else {
            None
        }
    }

    /// Returns `true` if all components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool
    where
        T: IsFinite,
    {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// The direction of gravity in the sensor frame implied by this orientation,
    /// i.e. the normalized accelerometer reading a stationary sensor would produce.
    pub fn gravity_direction(&self) -> Vector3<T>
    where
        T: MatrixDataType,
    {
        let two = T::one() + T::one();
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);
        Vector3::new(
            two * x * z - two * w * y,
            two * w * x + two * y * z,
            T::one() - two * x * x - two * y * y,
        )
    }

    /// Converts the quaternion into Tait-Bryan angles, in degrees.
    pub fn to_euler_angles(&self) -> EulerAngles<T>
    where
        T: MatrixDataType
            + ArcTan<T, Output = T>
            + ArcSin<T, Output = T>
            + RadiansToDegrees
            + DegreeRange,
    {
        extract_euler_angles(self)
    }
}

/// Converts a unit quaternion into yaw, pitch and roll, in degrees.
///
/// The arc sine argument of the pitch angle is clamped to `[-1, 1]`, so the
/// gimbal-lock boundary yields ±90° instead of NaN. Yaw and roll are mapped
/// into `(-180°, 180°]`.
pub fn extract_euler_angles<T>(q: &Quaternion<T>) -> EulerAngles<T>
where
    T: MatrixDataType
        + ArcTan<T, Output = T>
        + ArcSin<T, Output = T>
        + RadiansToDegrees
        + DegreeRange,
{
    let (q0, q1, q2, q3) = (q.w, q.x, q.y, q.z);
    let two = T::one() + T::one();

    let yaw = (two * (q1 * q2 + q0 * q3)).atan2(q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3);
    let pitch = T::zero() - (two * (q1 * q3 - q0 * q2)).arcsin_clamped();
    let roll = (two * (q0 * q1 + q2 * q3)).atan2(q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3);

    EulerAngles::new(
        roll.rad_to_deg().wrap_half_turn(),
        pitch.rad_to_deg().clamp_quarter_turn(),
        yaw.rad_to_deg().wrap_half_turn(),
    )
}

impl_standard_traits!(Quaternion, T, w, x, y, z);
