pub trait ArcTan<T> {
    type Output;

    fn atan2(self, rhs: T) -> Self::Output;
}

pub trait ArcSin<T> {
    type Output;

    fn arcsin(self) -> Self::Output;

    /// Calculates the arc sine after clamping the argument to `[-1, 1]`.
    ///
    /// Rounding can push values such as `2·(xz - wy)` slightly past ±1 near
    /// ±90° pitch, which would otherwise produce NaN.
    fn arcsin_clamped(self) -> Self::Output;
}

/// Conversion from radians to degrees.
pub trait RadiansToDegrees {
    fn rad_to_deg(self) -> Self;
}

/// Conversion from degrees to radians.
pub trait DegreesToRadians {
    fn deg_to_rad(self) -> Self;
}

/// Range reduction for angles given in degrees.
pub trait DegreeRange {
    /// Maps the angle into `(-180°, 180°]`.
    fn wrap_half_turn(self) -> Self;

    /// Clamps the angle into `[-90°, 90°]`.
    fn clamp_quarter_turn(self) -> Self;
}

pub trait IsNaN {
    /// Returns `true` if the value is NaN.
    fn is_nan(&self) -> bool;
}

pub trait IsFinite {
    /// Returns `true` if the value is neither NaN nor infinite.
    fn is_finite(&self) -> bool;
}

pub trait Epsilon {
    /// The difference between `1.0` and the next larger representable value.
    fn epsilon() -> Self;
}

#[cfg(feature = "std")]
impl ArcTan<f32> for f32 {
    type Output = f32;

    #[inline(always)]
    fn atan2(self, other: f32) -> Self::Output {
        f32::atan2(self, other)
    }
}

#[cfg(not(feature = "std"))]
impl ArcTan<f32> for f32 {
    type Output = f32;

    #[inline(always)]
    fn atan2(self, other: f32) -> Self::Output {
        libm::atan2f(self, other)
    }
}

#[cfg(feature = "std")]
impl ArcTan<f64> for f64 {
    type Output = f64;

    #[inline(always)]
    fn atan2(self, other: f64) -> Self::Output {
        f64::atan2(self, other)
    }
}

#[cfg(not(feature = "std"))]
impl ArcTan<f64> for f64 {
    type Output = f64;

    #[inline(always)]
    fn atan2(self, other: f64) -> Self::Output {
        libm::atan2(self, other)
    }
}

impl ArcSin<f32> for f32 {
    type Output = f32;

    #[inline(always)]
    fn arcsin(self) -> Self::Output {
        #[cfg(feature = "std")]
        {
            f32::asin(self)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::asinf(self)
        }
    }

    #[inline]
    fn arcsin_clamped(self) -> Self::Output {
        self.clamp(-1.0, 1.0).arcsin()
    }
}

impl ArcSin<f64> for f64 {
    type Output = f64;

    #[inline(always)]
    fn arcsin(self) -> Self::Output {
        #[cfg(feature = "std")]
        {
            f64::asin(self)
        }
        #[cfg(not(feature = "std"))]
        {
            libm::asin(self)
        }
    }

    #[inline]
    fn arcsin_clamped(self) -> Self::Output {
        self.clamp(-1.0, 1.0).arcsin()
    }
}

impl RadiansToDegrees for f32 {
    #[inline(always)]
    fn rad_to_deg(self) -> Self {
        self * (180.0 / core::f32::consts::PI)
    }
}

impl RadiansToDegrees for f64 {
    #[inline(always)]
    fn rad_to_deg(self) -> Self {
        self * (180.0 / core::f64::consts::PI)
    }
}

impl DegreesToRadians for f32 {
    #[inline(always)]
    fn deg_to_rad(self) -> Self {
        self * (core::f32::consts::PI / 180.0)
    }
}

impl DegreesToRadians for f64 {
    #[inline(always)]
    fn deg_to_rad(self) -> Self {
        self * (core::f64::consts::PI / 180.0)
    }
}

impl DegreeRange for f32 {
    #[inline]
    fn wrap_half_turn(self) -> Self {
        if self <= -180.0 {
            self + 360.0
        } else if self > 180.0 {
            self - 360.0
        } else {
            self
        }
    }

    #[inline]
    fn clamp_quarter_turn(self) -> Self {
        self.clamp(-90.0, 90.0)
    }
}

impl DegreeRange for f64 {
    #[inline]
    fn wrap_half_turn(self) -> Self {
        if self <= -180.0 {
            self + 360.0
        } else if self > 180.0 {
            self - 360.0
        } else {
            self
        }
    }

    #[inline]
    fn clamp_quarter_turn(self) -> Self {
        self.clamp(-90.0, 90.0)
    }
}

impl IsNaN for f32 {
    #[inline(always)]
    fn is_nan(&self) -> bool {
        f32::is_nan(*self)
    }
}

impl IsNaN for f64 {
    #[inline(always)]
    fn is_nan(&self) -> bool {
        f64::is_nan(*self)
    }
}

impl IsFinite for f32 {
    #[inline(always)]
    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

impl IsFinite for f64 {
    #[inline(always)]
    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Epsilon for f32 {
    #[inline(always)]
    fn epsilon() -> Self {
        f32::EPSILON
    }
}

impl Epsilon for f64 {
    #[inline(always)]
    fn epsilon() -> Self {
        f64::EPSILON
    }
}
