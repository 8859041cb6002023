use crate::impl_standard_traits;
use core::ops::Add;
use uniform_array_derive::UniformArray;

/// The gyroscope bias correction estimated by the filter, in radians per second.
#[derive(UniformArray)]
#[cfg_attr(test, ensure_uniform_type::ensure_uniform_type)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct GyroscopeBias<T> {
    /// The bias around the x-axis, in radians per second.
    pub omega_x: T,
    /// The bias around the y-axis, in radians per second.
    pub omega_y: T,
    /// The bias around the z-axis, in radians per second.
    pub omega_z: T,
}

impl<T> GyroscopeBias<T> {
    /// Initializes a new [`GyroscopeBias`] instance.
    #[inline(always)]
    pub const fn new(omega_x: T, omega_y: T, omega_z: T) -> Self {
        Self {
            omega_x,
            omega_y,
            omega_z,
        }
    }
}

/// Accumulates two bias terms.
impl<T> Add<GyroscopeBias<T>> for GyroscopeBias<T>
where
    T: Add<T, Output = T>,
{
    type Output = GyroscopeBias<T>;

    #[inline]
    fn add(self, rhs: GyroscopeBias<T>) -> Self::Output {
        Self {
            omega_x: self.omega_x + rhs.omega_x,
            omega_y: self.omega_y + rhs.omega_y,
            omega_z: self.omega_z + rhs.omega_z,
        }
    }
}

impl_standard_traits!(GyroscopeBias, T, omega_x, omega_y, omega_z);
