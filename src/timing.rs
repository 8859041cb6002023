//! Integration interval bookkeeping.

/// Computes the interval between successive updates from a free-running
/// microsecond counter.
///
/// The counter may wrap around; intervals are computed with wrapping
/// subtraction and are therefore never negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeltaTimer {
    last_update_us: Option<u32>,
}

impl DeltaTimer {
    /// Creates a timer that has not seen a timestamp yet.
    pub const fn new() -> Self {
        Self {
            last_update_us: None,
        }
    }

    /// Records `now_us` and returns the seconds elapsed since the previous call.
    ///
    /// The first call returns zero, so nothing is integrated.
    pub fn tick(&mut self, now_us: u32) -> f32 {
        let elapsed_us = match self.last_update_us.replace(now_us) {
            Some(last) => now_us.wrapping_sub(last),
            None => 0,
        };
        elapsed_us as f32 * 1e-6
    }

    /// The timestamp of the last call to [`tick`](Self::tick).
    pub const fn last_update_us(&self) -> Option<u32> {
        self.last_update_us
    }

    /// Forgets the last timestamp.
    pub fn reset(&mut self) {
        self.last_update_us = None;
    }
}
