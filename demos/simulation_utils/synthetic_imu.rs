use madgwick_orientation::{
    AccelFullScale, BiasVector, GyroFullScale, MotionSensor, RawAxes, SelfTestReport,
};
use std::convert::Infallible;

/// A simulated IMU that rolls around its x-axis at a constant rate until it
/// reaches a target angle, with a constant gyroscope offset.
pub struct SyntheticImu {
    accel_range: AccelFullScale,
    gyro_range: GyroFullScale,
    /// Roll rate in °/s.
    roll_rate: f32,
    /// Final roll angle in degrees.
    roll_target: f32,
    /// Constant gyroscope offset in °/s.
    gyro_offset: [f32; 3],
    /// Simulated time in seconds.
    time: f32,
}

impl SyntheticImu {
    pub fn new(roll_rate: f32, roll_target: f32, gyro_offset: [f32; 3]) -> Self {
        Self {
            accel_range: AccelFullScale::G16,
            gyro_range: GyroFullScale::Dps2000,
            roll_rate,
            roll_target,
            gyro_offset,
            time: 0.0,
        }
    }

    /// Advances the simulated time.
    pub fn advance(&mut self, seconds: f32) {
        self.time += seconds;
    }

    /// The true roll angle in degrees.
    pub fn true_roll(&self) -> f32 {
        (self.roll_rate * self.time).min(self.roll_target)
    }

    fn current_rate(&self) -> f32 {
        if self.true_roll() < self.roll_target {
            self.roll_rate
        } else {
            0.0
        }
    }

    fn to_counts(value: f32, resolution: f32) -> i16 {
        (value / resolution)
            .round()
            .clamp(f32::from(i16::MIN), f32::from(i16::MAX)) as i16
    }
}

impl MotionSensor for SyntheticImu {
    type Error = Infallible;

    fn identify(&mut self) -> Result<u8, Infallible> {
        Ok(0x68)
    }

    fn is_ready(&mut self) -> Result<bool, Infallible> {
        Ok(true)
    }

    fn read_accel(&mut self) -> Result<RawAxes, Infallible> {
        let (sin, cos) = self.true_roll().to_radians().sin_cos();
        let resolution = self.accel_resolution();
        Ok(RawAxes::new(
            0,
            Self::to_counts(sin, resolution),
            Self::to_counts(cos, resolution),
        ))
    }

    fn read_gyro(&mut self) -> Result<RawAxes, Infallible> {
        let resolution = self.gyro_resolution();
        let [x, y, z] = self.gyro_offset;
        Ok(RawAxes::new(
            Self::to_counts(self.current_rate() + x, resolution),
            Self::to_counts(y, resolution),
            Self::to_counts(z, resolution),
        ))
    }

    fn read_temperature(&mut self) -> Result<i16, Infallible> {
        // About 25 °C.
        Ok(-3920)
    }

    fn accel_resolution(&self) -> f32 {
        self.accel_range.resolution()
    }

    fn gyro_resolution(&self) -> f32 {
        self.gyro_range.resolution()
    }

    fn self_test(&mut self) -> Result<SelfTestReport, Infallible> {
        Ok(SelfTestReport::from_array([0.2, 0.3, 0.1, 0.4, 0.2, 0.3]))
    }

    fn calibrate(&mut self) -> Result<BiasVector, Infallible> {
        Ok(BiasVector::new([0.0; 3], self.gyro_offset))
    }
}
