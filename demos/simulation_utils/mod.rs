mod synthetic_imu;

pub use synthetic_imu::*;
