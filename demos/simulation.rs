use std::error::Error;

use madgwick_orientation::{
    CalibrationStore, CycleOutcome, EngineConfig, OrientationEngine, RamStorage,
};

use crate::simulation_utils::SyntheticImu;

mod simulation_utils;

/// Sample period in microseconds (200 Hz).
const SAMPLE_PERIOD_US: u32 = 5_000;

fn main() -> Result<(), Box<dyn Error>> {
    // Roll to 40° at 20 °/s with a small gyroscope offset.
    let mut imu = SyntheticImu::new(20.0, 40.0, [0.3, -0.2, 0.1]);

    // Calibrate once and persist the biases.
    let mut storage = RamStorage::<64>::new();
    let mut engine = OrientationEngine::new(EngineConfig::default());
    engine.initialize(&mut imu)?;
    engine.save_calibration(&mut CalibrationStore::new(&mut storage)?)?;

    // Restart from the stored calibration and subtract the measured gyro offset.
    let config = EngineConfig::default().with_subtract_gyro_bias(true);
    let mut engine = OrientationEngine::new(config);
    let mut store = CalibrationStore::new(&mut storage)?;
    if !engine.load_calibration(&mut store)? {
        println!("No stored calibration, using factory defaults");
    }
    engine.activate_with_bias(&mut imu, engine.bias())?;

    println!(" time |  true roll |  roll  | pitch  |  yaw   | temp");
    let mut now_us: u32 = 0;
    for step in 0..=1200 {
        if let CycleOutcome::Filtered(outcome) = engine.update(&mut imu, now_us)? {
            if !outcome.is_applied() && step > 0 {
                println!("skipped: {outcome:?}");
            }
        }

        if step % 100 == 0 {
            let angles = engine.euler_angles();
            println!(
                "{:4.1}s | {:9.2}° | {:6.2} | {:6.2} | {:6.2} | {:.1} °C",
                step as f32 * SAMPLE_PERIOD_US as f32 * 1e-6,
                imu.true_roll(),
                angles.roll,
                angles.pitch,
                angles.yaw,
                engine.temperature()
            );
        }

        imu.advance(SAMPLE_PERIOD_US as f32 * 1e-6);
        now_us = now_us.wrapping_add(SAMPLE_PERIOD_US);
    }

    let snapshot = engine.snapshot();
    println!("final quaternion: {:?}", snapshot.quaternion);
    Ok(())
}
