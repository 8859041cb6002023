//! Error types.

use crate::calibration::SelfTestReport;
use core::fmt;

/// Orientation engine errors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the motion sensor
    Bus(E),
    /// Unexpected device ID (contains the actual value read)
    InvalidDevice(u8),
    /// The built-in self-test reported a deviation of 1% or more
    SelfTestFailed(SelfTestReport),
    /// The engine has not been activated yet
    NotActive,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(error) => write!(f, "motion sensor communication failed: {error:?}"),
            Self::InvalidDevice(id) => write!(f, "unexpected device ID 0x{id:02X}"),
            Self::SelfTestFailed(report) => write!(
                f,
                "self-test failed with a deviation of {}%",
                report.worst_deviation()
            ),
            Self::NotActive => f.write_str("orientation engine is not active"),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for Error<E> where E: fmt::Debug {}

/// Calibration store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError<E> {
    /// The underlying storage failed
    Storage(E),
    /// The storage is too small to hold a calibration block
    OutOfBounds,
}

impl<E> From<E> for StoreError<E> {
    fn from(error: E) -> Self {
        Self::Storage(error)
    }
}

impl<E> fmt::Display for StoreError<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(error) => write!(f, "calibration storage failed: {error:?}"),
            Self::OutOfBounds => f.write_str("calibration block exceeds storage bounds"),
        }
    }
}

#[cfg(feature = "std")]
impl<E> std::error::Error for StoreError<E> where E: fmt::Debug {}
