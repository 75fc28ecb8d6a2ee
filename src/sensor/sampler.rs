//! Periodic sampling tasks, one per physical quantity

use log::{debug, info};
use tokio::time::{sleep, Duration};

use crate::models::{DISTANCE_NO_DATA, TEMPERATURE_NO_DATA};
use crate::sensor::channel::ReadingSender;
use crate::sensor::filter::MovingAverage;
use crate::sensor::source::RawSensor;
use crate::utils::{celsius_to_fahrenheit, echo_to_centimetres};

pub const TEMPERATURE_WINDOW: usize = 10;
pub const DISTANCE_WINDOW: usize = 100;

const TEMPERATURE_PERIOD: Duration = Duration::from_millis(1000);
const DISTANCE_PERIOD: Duration = Duration::from_millis(200);
const SEND_TIMEOUT: Duration = Duration::from_millis(100);

/// Reads one sensor, smooths it and publishes the running average
///
/// Each cycle: read raw value, convert units, push into the filter, send the
/// new average with a bounded wait, then sleep for the fixed period. A send
/// that times out drops that average; the sampler never builds a backlog.
pub struct Sampler<S: RawSensor, const N: usize> {
    name: &'static str,
    sensor: S,
    convert: fn(f32) -> f32,
    filter: MovingAverage<N>,
    tx: ReadingSender,
    period: Duration,
}

/// Raw Celsius in, Fahrenheit average over 10 samples out, once a second
pub fn temperature_sampler<S: RawSensor>(
    sensor: S,
    tx: ReadingSender,
) -> Sampler<S, TEMPERATURE_WINDOW> {
    Sampler {
        name: "temperature",
        sensor,
        convert: celsius_to_fahrenheit,
        filter: MovingAverage::new(TEMPERATURE_NO_DATA),
        tx,
        period: TEMPERATURE_PERIOD,
    }
}

/// Echo round-trip in, centimetre average over 100 samples out, five times a second
pub fn distance_sampler<S: RawSensor>(sensor: S, tx: ReadingSender) -> Sampler<S, DISTANCE_WINDOW> {
    Sampler {
        name: "distance",
        sensor,
        convert: echo_to_centimetres,
        filter: MovingAverage::new(DISTANCE_NO_DATA),
        tx,
        period: DISTANCE_PERIOD,
    }
}

impl<S: RawSensor, const N: usize> Sampler<S, N> {
    /// Run one cycle without the trailing sleep and return the average it published
    pub async fn sample_once(&mut self) -> f32 {
        let raw = self.sensor.read();
        self.filter.push((self.convert)(raw));
        let average = self.filter.average();

        debug!(
            "{}: raw={:.2} average={:.2} over {} samples",
            self.name,
            raw,
            average,
            self.filter.sample_count()
        );

        self.tx.offer(average, SEND_TIMEOUT).await;
        average
    }

    pub async fn run(mut self) {
        info!(
            "Starting {} sampler (window {}, period {:?})",
            self.name, N, self.period
        );

        loop {
            self.sample_once().await;
            sleep(self.period).await;
        }
    }
}
