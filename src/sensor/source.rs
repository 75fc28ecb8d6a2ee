//! Raw sensor readings feeding the samplers

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A physical quantity read in its native unit
///
/// Reads never fail at this layer: whatever the hardware returns is passed
/// through and the moving average damps occasional bad samples.
pub trait RawSensor: Send + 'static {
    fn read(&mut self) -> f32;
}

/// Thermometer stand-in producing Celsius values around a base point
pub struct SimulatedThermometer {
    base_celsius: f32,
    rng: StdRng,
}

impl SimulatedThermometer {
    pub fn new(base_celsius: f32) -> Self {
        Self {
            base_celsius,
            rng: StdRng::from_entropy(),
        }
    }
}

impl RawSensor for SimulatedThermometer {
    fn read(&mut self) -> f32 {
        self.base_celsius + self.rng.gen_range(-0.5..=0.5)
    }
}

/// Ultrasonic range finder stand-in producing echo round-trip times (µs)
pub struct SimulatedRangeFinder {
    base_echo_us: f32,
    rng: StdRng,
}

impl SimulatedRangeFinder {
    pub fn new(base_echo_us: f32) -> Self {
        Self {
            base_echo_us,
            rng: StdRng::from_entropy(),
        }
    }
}

impl RawSensor for SimulatedRangeFinder {
    fn read(&mut self) -> f32 {
        (self.base_echo_us + self.rng.gen_range(-20.0..=20.0)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_values_stay_near_base() {
        let mut thermometer = SimulatedThermometer::new(4.0);
        let mut range_finder = SimulatedRangeFinder::new(10.0);
        for _ in 0..200 {
            let celsius = thermometer.read();
            assert!((3.5..=4.5).contains(&celsius));

            let echo = range_finder.read();
            assert!((0.0..=30.0).contains(&echo));
        }
    }
}
