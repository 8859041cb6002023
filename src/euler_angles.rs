use crate::impl_standard_traits;
use crate::IsFinite;
use uniform_array_derive::UniformArray;

/// Tait-Bryan angles, applied in yaw, pitch, roll order.
///
/// With the positive z-axis pointing toward Earth, yaw is the heading around
/// z (counterclockwise when looking down on the sensor), pitch is the angle
/// between the x-axis and the ground plane (positive toward Earth) and roll
/// is the angle between the y-axis and the ground plane.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct EulerAngles<T> {
    /// The roll angle, in degrees.
    pub roll: T,
    /// The pitch angle, in degrees.
    pub pitch: T,
    /// The yaw angle, in degrees.
    pub yaw: T,
}

impl<T> EulerAngles<T> {
    /// Initializes a new [`EulerAngles`] instance.
    #[inline(always)]
    pub const fn new(roll: T, pitch: T, yaw: T) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Returns `true` if all three angles are finite.
    pub fn is_finite(&self) -> bool
    where
        T: IsFinite,
    {
        self.roll.is_finite() && self.pitch.is_finite() && self.yaw.is_finite()
    }
}

impl_standard_traits!(EulerAngles, T, roll, pitch, yaw);
