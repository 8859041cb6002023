//! Self-test and stationary bias calibration.

use crate::error::Error;
use crate::sensor::MotionSensor;

/// Self-test deviations must stay below this value, in percent.
pub const SELF_TEST_THRESHOLD: f32 = 1.0;

/// Per-axis deviation from factory trim reported by the built-in self-test, in percent.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SelfTestReport {
    /// Accelerometer x, y, z
    pub accel: [f32; 3],
    /// Gyroscope x, y, z
    pub gyro: [f32; 3],
}

impl SelfTestReport {
    /// Builds a report from accelerometer x, y, z followed by gyroscope x, y, z.
    pub const fn from_array(values: [f32; 6]) -> Self {
        Self {
            accel: [values[0], values[1], values[2]],
            gyro: [values[3], values[4], values[5]],
        }
    }

    /// The six deviations in accelerometer-then-gyroscope order.
    pub const fn as_array(&self) -> [f32; 6] {
        [
            self.accel[0],
            self.accel[1],
            self.accel[2],
            self.gyro[0],
            self.gyro[1],
            self.gyro[2],
        ]
    }

    /// Returns `true` if every deviation is below [`SELF_TEST_THRESHOLD`].
    ///
    /// A NaN deviation fails the test.
    pub fn passed(&self) -> bool {
        self.as_array()
            .iter()
            .all(|&deviation| deviation < SELF_TEST_THRESHOLD)
    }

    /// The largest deviation.
    pub fn worst_deviation(&self) -> f32 {
        self.as_array().into_iter().fold(f32::MIN, f32::max)
    }
}

/// Accelerometer and gyroscope biases.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BiasVector {
    /// Accelerometer bias in g
    pub accel: [f32; 3],
    /// Gyroscope bias in °/s
    pub gyro: [f32; 3],
}

impl BiasVector {
    /// The biases assumed when no valid calibration has been stored.
    pub const FACTORY_DEFAULT: Self = Self {
        accel: [0.005, -0.008, -0.001],
        gyro: [1.5, -0.5, 0.7],
    };

    /// Initializes a new [`BiasVector`] instance.
    pub const fn new(accel: [f32; 3], gyro: [f32; 3]) -> Self {
        Self { accel, gyro }
    }
}

/// The initialization stages of the orientation engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleState {
    /// No device has been confirmed.
    #[default]
    Disconnected,
    /// The device reported the expected ID.
    Connected,
    /// The built-in self-test passed.
    SelfTestPassed,
    /// Biases are known.
    Calibrated,
    /// Samples are being fused.
    Active,
}

/// Identifies the device, runs the self-test and calibrates the biases.
#[derive(Debug)]
pub struct CalibrationProcedure {
    expected_id: u8,
    state: LifecycleState,
}

impl CalibrationProcedure {
    /// Initializes a new procedure for a device reporting `expected_id`.
    pub const fn new(expected_id: u8) -> Self {
        Self {
            expected_id,
            state: LifecycleState::Disconnected,
        }
    }

    /// The last state reached.
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Confirms the device identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDevice`] if the device reports a different ID.
    pub fn connect<S>(&mut self, sensor: &mut S) -> Result<(), Error<S::Error>>
    where
        S: MotionSensor,
    {
        let id = sensor.identify()?;
        if id != self.expected_id {
            log::warn!(
                "Unexpected device ID 0x{:02X}, expected 0x{:02X}",
                id,
                self.expected_id
            );
            return Err(Error::InvalidDevice(id));
        }

        log::debug!("Motion sensor 0x{:02X} connected", id);
        self.state = LifecycleState::Connected;
        Ok(())
    }

    /// Runs the complete procedure and returns the measured biases.
    ///
    /// Failures are reported, not retried; [`state`](Self::state) tells how far
    /// the procedure got.
    ///
    /// # Errors
    ///
    /// - [`Error::Bus`] if communication fails
    /// - [`Error::InvalidDevice`] if the device reports an unexpected ID
    /// - [`Error::SelfTestFailed`] if any self-test deviation is 1% or more
    pub fn run<S>(&mut self, sensor: &mut S) -> Result<BiasVector, Error<S::Error>>
    where
        S: MotionSensor,
    {
        self.state = LifecycleState::Disconnected;
        self.connect(sensor)?;

        let report = sensor.self_test()?;
        if !report.passed() {
            log::warn!(
                "Self-test failed, worst deviation {}%",
                report.worst_deviation()
            );
            return Err(Error::SelfTestFailed(report));
        }
        self.state = LifecycleState::SelfTestPassed;

        let bias = sensor.calibrate()?;
        log::info!(
            "Calibrated accel bias {:?} g, gyro bias {:?} °/s",
            bias.accel,
            bias.gyro
        );
        self.state = LifecycleState::Calibrated;
        Ok(bias)
    }
}
