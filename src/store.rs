//! Persistence of calibration biases in a small non-volatile byte store.
//!
//! The block layout is fixed:
//!
//! | Offset | Size | Content                                   |
//! |--------|------|-------------------------------------------|
//! | 0      | 1    | validity flag, [`CALIBRATION_VALID`]      |
//! | 1      | 12   | accelerometer bias, 3 × `f32` little-endian |
//! | 13     | 12   | gyroscope bias, 3 × `f32` little-endian   |

use crate::calibration::BiasVector;
use crate::error::StoreError;

/// Size of a calibration block in bytes.
pub const CALIBRATION_BLOCK_SIZE: usize = 25;

/// Flag value marking a block as valid.
pub const CALIBRATION_VALID: u8 = 0x01;

/// The value of erased storage, written by [`CalibrationStore::clear`].
pub const CALIBRATION_ERASED: u8 = 0xFF;

const FLAG_OFFSET: usize = 0;
const ACCEL_OFFSET: usize = 1;
const GYRO_OFFSET: usize = 13;

/// A byte-addressed non-volatile store, such as an emulated EEPROM.
pub trait NonVolatileStorage {
    /// The storage error type.
    type Error;

    /// The capacity in bytes.
    fn capacity(&self) -> usize;

    /// Reads `buffer.len()` bytes starting at `offset`.
    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `data` starting at `offset`.
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error>;

    /// Makes previous writes durable.
    fn commit(&mut self) -> Result<(), Self::Error>;
}

/// The result of loading a calibration block.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoredCalibration {
    /// The stored biases, or [`BiasVector::FACTORY_DEFAULT`] if none are valid.
    pub bias: BiasVector,
    /// Whether the biases were read from a valid block.
    pub valid: bool,
}

/// Reads and writes a [`BiasVector`] at a fixed offset of a [`NonVolatileStorage`].
pub struct CalibrationStore<S> {
    storage: S,
    base: usize,
}

impl<S> CalibrationStore<S>
where
    S: NonVolatileStorage,
{
    /// Places the calibration block at the start of `storage`.
    pub fn new(storage: S) -> Result<Self, StoreError<S::Error>> {
        Self::with_offset(storage, 0)
    }

    /// Places the calibration block at `base` within `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfBounds`] if the block does not fit.
    pub fn with_offset(storage: S, base: usize) -> Result<Self, StoreError<S::Error>> {
        match base.checked_add(CALIBRATION_BLOCK_SIZE) {
            Some(end) if end <= storage.capacity() => Ok(Self { storage, base }),
            _ => Err(StoreError::OutOfBounds),
        }
    }

    /// Returns the underlying storage.
    pub fn release(self) -> S {
        self.storage
    }

    /// Returns `true` if a valid calibration has been stored.
    pub fn is_calibrated(&mut self) -> Result<bool, StoreError<S::Error>> {
        let mut flag = [0u8; 1];
        self.storage.read(self.base + FLAG_OFFSET, &mut flag)?;
        Ok(flag[0] == CALIBRATION_VALID)
    }

    /// Loads the stored biases, falling back to [`BiasVector::FACTORY_DEFAULT`].
    pub fn load(&mut self) -> Result<StoredCalibration, StoreError<S::Error>> {
        let mut block = [0u8; CALIBRATION_BLOCK_SIZE];
        self.storage.read(self.base, &mut block)?;

        if block[FLAG_OFFSET] != CALIBRATION_VALID {
            log::info!("No stored calibration, using factory defaults");
            return Ok(StoredCalibration {
                bias: BiasVector::FACTORY_DEFAULT,
                valid: false,
            });
        }

        let bias = BiasVector {
            accel: decode_axes(&block[ACCEL_OFFSET..GYRO_OFFSET]),
            gyro: decode_axes(&block[GYRO_OFFSET..]),
        };
        log::debug!("Loaded stored calibration {:?}", bias);
        Ok(StoredCalibration { bias, valid: true })
    }

    /// Writes all 25 bytes and commits.
    pub fn save(&mut self, bias: &BiasVector) -> Result<(), StoreError<S::Error>> {
        self.save_uncommitted(bias)?;
        self.storage.commit()?;
        log::debug!("Saved calibration {:?}", bias);
        Ok(())
    }

    /// Writes all 25 bytes without committing.
    pub fn save_uncommitted(&mut self, bias: &BiasVector) -> Result<(), StoreError<S::Error>> {
        let mut block = [0u8; CALIBRATION_BLOCK_SIZE];
        block[FLAG_OFFSET] = CALIBRATION_VALID;
        encode_axes(&bias.accel, &mut block[ACCEL_OFFSET..GYRO_OFFSET]);
        encode_axes(&bias.gyro, &mut block[GYRO_OFFSET..]);
        self.storage.write(self.base, &block)?;
        Ok(())
    }

    /// Erases the block and commits.
    pub fn clear(&mut self) -> Result<(), StoreError<S::Error>> {
        self.storage
            .write(self.base, &[CALIBRATION_ERASED; CALIBRATION_BLOCK_SIZE])?;
        self.storage.commit()?;
        log::debug!("Cleared stored calibration");
        Ok(())
    }
}

fn decode_axes(bytes: &[u8]) -> [f32; 3] {
    let mut axes = [0.0; 3];
    for (axis, chunk) in axes.iter_mut().zip(bytes.chunks_exact(4)) {
        *axis = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    axes
}

fn encode_axes(axes: &[f32; 3], bytes: &mut [u8]) {
    for (axis, chunk) in axes.iter().zip(bytes.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&axis.to_le_bytes());
    }
}

/// Storage access outside of the available bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange;

/// An in-memory [`NonVolatileStorage`] of `N` bytes, erased to [`CALIBRATION_ERASED`].
///
/// Commits are counted so callers can observe when data became durable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamStorage<const N: usize> {
    bytes: [u8; N],
    commits: usize,
}

impl<const N: usize> RamStorage<N> {
    /// Creates erased storage.
    pub const fn new() -> Self {
        Self {
            bytes: [CALIBRATION_ERASED; N],
            commits: 0,
        }
    }

    /// The raw contents.
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The number of commits performed.
    pub const fn commits(&self) -> usize {
        self.commits
    }

    fn range(offset: usize, len: usize) -> Result<core::ops::Range<usize>, OutOfRange> {
        match offset.checked_add(len) {
            Some(end) if end <= N => Ok(offset..end),
            _ => Err(OutOfRange),
        }
    }
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NonVolatileStorage for RamStorage<N> {
    type Error = OutOfRange;

    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), OutOfRange> {
        let range = Self::range(offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), OutOfRange> {
        let range = Self::range(offset, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), OutOfRange> {
        self.commits += 1;
        Ok(())
    }
}

impl<S> NonVolatileStorage for &mut S
where
    S: NonVolatileStorage + ?Sized,
{
    type Error = S::Error;

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(offset, buffer)
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(offset, data)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        (**self).commit()
    }
}
