//! The orientation engine: sensor polling, conditioning, fusion and angle extraction.

use crate::calibration::{BiasVector, CalibrationProcedure, LifecycleState};
use crate::conditioner::{PhysicalSample, RawSample, SampleConditioner, ScaleFactors};
use crate::config::EngineConfig;
use crate::error::{Error, StoreError};
use crate::madgwick::{MadgwickFilter, UpdateOutcome};
use crate::quaternion::Quaternion;
use crate::sensor::{raw_to_celsius, MotionSensor};
use crate::store::{CalibrationStore, NonVolatileStorage};
use crate::timing::DeltaTimer;
use crate::EulerAngles;

/// The result of polling the sensor once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleOutcome {
    /// No new sample was available; the orientation is unchanged.
    NotReady,
    /// A sample was read and handed to the filter.
    Filtered(UpdateOutcome),
}

/// A copy of the engine's observable state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationSnapshot {
    /// The orientation quaternion
    pub quaternion: Quaternion<f32>,
    /// Roll, pitch and yaw in degrees
    pub angles: EulerAngles<f32>,
    /// The last conditioned sample
    pub sample: PhysicalSample,
    /// The current biases
    pub bias: BiasVector,
    /// The lifecycle state
    pub state: LifecycleState,
}

/// Fuses accelerometer and gyroscope samples into an orientation estimate.
///
/// The engine owns its state exclusively. Readers in another execution
/// context should take a [`snapshot`](Self::snapshot) under their own lock.
pub struct OrientationEngine {
    config: EngineConfig,
    filter: MadgwickFilter<f32>,
    conditioner: SampleConditioner,
    scale: ScaleFactors,
    bias: BiasVector,
    sample: PhysicalSample,
    angles: EulerAngles<f32>,
    state: LifecycleState,
    timer: DeltaTimer,
}

impl OrientationEngine {
    /// Creates a disconnected engine at the identity orientation.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            filter: MadgwickFilter::new(config.filter_parameters(), config.bias_mode),
            conditioner: SampleConditioner::new(config.subtract_gyro_bias),
            scale: ScaleFactors::from_ranges(config.accel_range, config.gyro_range),
            bias: BiasVector::FACTORY_DEFAULT,
            sample: PhysicalSample::default(),
            angles: EulerAngles::default(),
            state: LifecycleState::Disconnected,
            timer: DeltaTimer::new(),
        }
    }

    /// The configuration the engine was created with.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The lifecycle state.
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    /// Returns `true` once samples are being fused.
    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    /// The underlying filter.
    pub const fn filter(&self) -> &MadgwickFilter<f32> {
        &self.filter
    }

    /// Identifies the device, runs the self-test, calibrates and activates the engine.
    ///
    /// On failure the engine stays in the last state reached and is never activated.
    ///
    /// # Errors
    ///
    /// - [`Error::Bus`] if communication fails
    /// - [`Error::InvalidDevice`] if the device reports an unexpected ID
    /// - [`Error::SelfTestFailed`] if the self-test deviates by 1% or more
    pub fn initialize<S>(&mut self, sensor: &mut S) -> Result<(), Error<S::Error>>
    where
        S: MotionSensor,
    {
        let mut procedure = CalibrationProcedure::new(self.config.expected_device_id);
        let result = procedure.run(sensor);
        self.state = procedure.state();

        self.bias = result?;
        self.scale = sensor.scale_factors();
        self.transition(LifecycleState::Active);
        Ok(())
    }

    /// Confirms the device identity without running the self-test.
    ///
    /// # Errors
    ///
    /// - [`Error::Bus`] if communication fails
    /// - [`Error::InvalidDevice`] if the device reports an unexpected ID
    pub fn connect<S>(&mut self, sensor: &mut S) -> Result<(), Error<S::Error>>
    where
        S: MotionSensor,
    {
        let mut procedure = CalibrationProcedure::new(self.config.expected_device_id);
        let result = procedure.connect(sensor);
        self.state = procedure.state();
        result?;

        self.scale = sensor.scale_factors();
        Ok(())
    }

    /// Confirms the device identity and activates the engine with known biases,
    /// e.g. ones restored through [`load_calibration`](Self::load_calibration).
    ///
    /// # Errors
    ///
    /// - [`Error::Bus`] if communication fails
    /// - [`Error::InvalidDevice`] if the device reports an unexpected ID
    pub fn activate_with_bias<S>(
        &mut self,
        sensor: &mut S,
        bias: BiasVector,
    ) -> Result<(), Error<S::Error>>
    where
        S: MotionSensor,
    {
        self.connect(sensor)?;
        self.bias = bias;
        self.transition(LifecycleState::Calibrated);
        self.transition(LifecycleState::Active);
        Ok(())
    }

    /// Replaces the biases with the stored ones, or the factory defaults if
    /// none are stored. Returns whether a valid calibration was found.
    pub fn load_calibration<N>(
        &mut self,
        store: &mut CalibrationStore<N>,
    ) -> Result<bool, StoreError<N::Error>>
    where
        N: NonVolatileStorage,
    {
        let stored = store.load()?;
        self.bias = stored.bias;
        Ok(stored.valid)
    }

    /// Persists the current biases.
    pub fn save_calibration<N>(
        &self,
        store: &mut CalibrationStore<N>,
    ) -> Result<(), StoreError<N::Error>>
    where
        N: NonVolatileStorage,
    {
        store.save(&self.bias)
    }

    /// Polls the sensor and, if a sample is ready, fuses it.
    ///
    /// `now_us` is a free-running microsecond timestamp; wraparound is handled.
    /// The first fused sample only records the timestamp.
    ///
    /// # Errors
    ///
    /// - [`Error::NotActive`] if the engine has not been activated
    /// - [`Error::Bus`] if communication fails
    pub fn update<S>(
        &mut self,
        sensor: &mut S,
        now_us: u32,
    ) -> Result<CycleOutcome, Error<S::Error>>
    where
        S: MotionSensor,
    {
        if !self.is_active() {
            return Err(Error::NotActive);
        }

        if !sensor.is_ready()? {
            return Ok(CycleOutcome::NotReady);
        }

        let raw = sensor.read_sample()?;
        self.scale = sensor.scale_factors();
        let temperature_c = sensor.temperature_celsius(raw.temperature);
        let delta_t = self.timer.tick(now_us);

        let outcome = self.fuse(&raw, temperature_c, delta_t);
        Ok(CycleOutcome::Filtered(outcome))
    }

    /// Fuses a sample the caller has read, integrating over `delta_t` seconds.
    ///
    /// The configured full-scale ranges determine the scale factors until a
    /// sensor has been connected. Returns `None` unless the engine is active.
    pub fn update_with_sample(&mut self, raw: &RawSample, delta_t: f32) -> Option<UpdateOutcome> {
        if !self.is_active() {
            return None;
        }

        Some(self.fuse(raw, raw_to_celsius(raw.temperature), delta_t))
    }

    fn fuse(&mut self, raw: &RawSample, temperature_c: f32, delta_t: f32) -> UpdateOutcome {
        self.sample = self
            .conditioner
            .condition(raw, &self.scale, &self.bias, temperature_c);

        let outcome = self.filter.update(
            &self.sample.accelerometer(),
            &self.sample.gyroscope(),
            delta_t,
        );

        if outcome.is_applied() {
            self.angles = self.filter.quaternion().to_euler_angles();
        } else {
            log::debug!("Skipped filter update: {:?}", outcome);
        }

        outcome
    }

    fn transition(&mut self, state: LifecycleState) {
        log::info!("Orientation engine {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// The orientation quaternion.
    pub fn orientation(&self) -> Quaternion<f32> {
        self.filter.quaternion()
    }

    /// Quaternion component `index` in (w, x, y, z) order, or `0` if out of range.
    pub fn quaternion(&self, index: usize) -> f32 {
        self.filter.quaternion().component(index).unwrap_or(0.0)
    }

    /// Roll, pitch and yaw in degrees.
    pub const fn euler_angles(&self) -> EulerAngles<f32> {
        self.angles
    }

    /// Roll in degrees.
    pub const fn roll(&self) -> f32 {
        self.angles.roll
    }

    /// Pitch in degrees.
    pub const fn pitch(&self) -> f32 {
        self.angles.pitch
    }

    /// Yaw in degrees.
    pub const fn yaw(&self) -> f32 {
        self.angles.yaw
    }

    /// The last acceleration on axis `index` in g, or `0` if out of range.
    pub fn acc(&self, index: usize) -> f32 {
        self.sample.accel_g.get(index).copied().unwrap_or(0.0)
    }

    /// The last angular rate on axis `index` in °/s, or `0` if out of range.
    pub fn gyro(&self, index: usize) -> f32 {
        self.sample.gyro_dps.get(index).copied().unwrap_or(0.0)
    }

    /// The last die temperature in °C.
    pub const fn temperature(&self) -> f32 {
        self.sample.temperature_c
    }

    /// The last conditioned sample.
    pub const fn sample(&self) -> &PhysicalSample {
        &self.sample
    }

    /// The current biases.
    pub const fn bias(&self) -> BiasVector {
        self.bias
    }

    /// The accelerometer bias on axis `index` in g, or `0` if out of range.
    pub fn acc_bias(&self, index: usize) -> f32 {
        self.bias.accel.get(index).copied().unwrap_or(0.0)
    }

    /// The gyroscope bias on axis `index` in °/s, or `0` if out of range.
    pub fn gyro_bias(&self, index: usize) -> f32 {
        self.bias.gyro.get(index).copied().unwrap_or(0.0)
    }

    /// Sets the accelerometer bias on axis `index`; out-of-range indices are ignored.
    pub fn set_acc_bias(&mut self, index: usize, value: f32) {
        if let Some(bias) = self.bias.accel.get_mut(index) {
            *bias = value;
        }
    }

    /// Sets the gyroscope bias on axis `index`; out-of-range indices are ignored.
    pub fn set_gyro_bias(&mut self, index: usize, value: f32) {
        if let Some(bias) = self.bias.gyro.get_mut(index) {
            *bias = value;
        }
    }

    /// Copies out the observable state.
    pub fn snapshot(&self) -> OrientationSnapshot {
        OrientationSnapshot {
            quaternion: self.filter.quaternion(),
            angles: self.angles,
            sample: self.sample,
            bias: self.bias,
            state: self.state,
        }
    }
}

impl Default for OrientationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
