//! Alert evaluators
//!
//! Two independent timer callbacks re-derive the alert condition from the
//! store on every tick, whether or not a new reading has arrived. They do
//! not coordinate: the message evaluator gives temperature priority over
//! the door, the indicator evaluator lights up if either rule fires. Neither
//! latches or debounces, so a value hovering at a threshold makes the
//! outputs follow it tick by tick.

use log::info;
use tokio::time::Duration;

use crate::coordinator::indicator::IndicatorOutput;
use crate::coordinator::store::ReadingStore;
use crate::coordinator::timer::TimerCallback;
use crate::models::{AlertThresholds, Reading};

pub const TEMPERATURE_ALERT: &str = "Temperature too high!";
pub const DOOR_OPEN_ALERT: &str = "Door is open!";

pub const MESSAGE_PERIOD: Duration = Duration::from_millis(20);
pub const INDICATOR_PERIOD: Duration = Duration::from_millis(31);

/// Alert text for a reading; temperature masks a simultaneous open door
pub fn alert_message(reading: &Reading, thresholds: &AlertThresholds) -> &'static str {
    if thresholds.temperature_exceeded(reading.temperature) {
        TEMPERATURE_ALERT
    } else if thresholds.distance_exceeded(reading.distance) {
        DOOR_OPEN_ALERT
    } else {
        ""
    }
}

pub fn indicator_on(reading: &Reading, thresholds: &AlertThresholds) -> bool {
    thresholds.temperature_exceeded(reading.temperature)
        || thresholds.distance_exceeded(reading.distance)
}

/// Keeps the store's alert text in line with the current readings
pub struct MessageEvaluator {
    store: ReadingStore,
    thresholds: AlertThresholds,
}

impl MessageEvaluator {
    pub fn new(store: ReadingStore, thresholds: AlertThresholds) -> Self {
        Self { store, thresholds }
    }
}

impl TimerCallback for MessageEvaluator {
    fn fire(&mut self) {
        let message = alert_message(&self.store.reading(), &self.thresholds);
        if self.store.set_alert_message(message) {
            if message.is_empty() {
                info!("Alert cleared");
            } else {
                info!("Alert raised: {}", message);
            }
        }
    }
}

/// Drives the alert light from the current readings
pub struct IndicatorEvaluator<O: IndicatorOutput> {
    store: ReadingStore,
    thresholds: AlertThresholds,
    output: O,
}

impl<O: IndicatorOutput> IndicatorEvaluator<O> {
    pub fn new(store: ReadingStore, thresholds: AlertThresholds, output: O) -> Self {
        Self {
            store,
            thresholds,
            output,
        }
    }
}

impl<O: IndicatorOutput> TimerCallback for IndicatorEvaluator<O> {
    fn fire(&mut self) {
        let on = indicator_on(&self.store.reading(), &self.thresholds);
        self.output.set(on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::timer::spawn_timer;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Records the last state and how often it was asserted
    #[derive(Clone, Default)]
    struct Probe {
        on: Arc<AtomicBool>,
        writes: Arc<AtomicUsize>,
    }

    impl IndicatorOutput for Probe {
        fn set(&mut self, on: bool) {
            self.on.store(on, Ordering::SeqCst);
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn reading(temperature: f32, distance: f32) -> Reading {
        Reading {
            temperature,
            distance,
        }
    }

    #[test]
    fn message_priority_and_thresholds() {
        let t = AlertThresholds::default();
        assert_eq!(alert_message(&reading(38.0, 20.0), &t), "");
        assert_eq!(alert_message(&reading(45.0, 20.0), &t), TEMPERATURE_ALERT);
        assert_eq!(alert_message(&reading(38.0, 150.0), &t), DOOR_OPEN_ALERT);
        assert_eq!(alert_message(&reading(45.0, 150.0), &t), TEMPERATURE_ALERT);
        // Thresholds must be strictly exceeded
        assert_eq!(alert_message(&reading(40.0, 100.0), &t), "");
    }

    #[test]
    fn indicator_is_logical_or() {
        let t = AlertThresholds::default();
        assert!(!indicator_on(&reading(38.0, 20.0), &t));
        assert!(indicator_on(&reading(45.0, 20.0), &t));
        assert!(indicator_on(&reading(38.0, 150.0), &t));
        assert!(indicator_on(&reading(45.0, 150.0), &t));
        assert!(!indicator_on(&reading(40.0, 100.0), &t));
    }

    #[test]
    fn sentinels_never_raise_alerts() {
        let t = AlertThresholds::default();
        let unknown = reading(
            crate::models::TEMPERATURE_NO_DATA,
            crate::models::DISTANCE_NO_DATA,
        );
        assert_eq!(alert_message(&unknown, &t), "");
        assert!(!indicator_on(&unknown, &t));
    }

    #[test]
    fn evaluators_raise_and_clear_on_next_cycle() {
        let store = ReadingStore::new();
        let probe = Probe::default();
        let thresholds = AlertThresholds::default();
        let mut message = MessageEvaluator::new(store.clone(), thresholds);
        let mut indicator = IndicatorEvaluator::new(store.clone(), thresholds, probe.clone());

        store.update(reading(45.0, 150.0));
        message.fire();
        indicator.fire();
        assert_eq!(store.snapshot().alert_message, TEMPERATURE_ALERT);
        assert!(probe.on.load(Ordering::SeqCst));

        // Temperature recovers while the door stays open
        store.update(reading(38.0, 150.0));
        message.fire();
        indicator.fire();
        assert_eq!(store.snapshot().alert_message, DOOR_OPEN_ALERT);
        assert!(probe.on.load(Ordering::SeqCst));

        store.update(reading(38.0, 20.0));
        message.fire();
        assert_eq!(store.snapshot().alert_message, "");
        indicator.fire();
        assert!(!probe.on.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn condition_is_reasserted_without_new_readings() {
        let store = ReadingStore::new();
        let probe = Probe::default();
        store.update(reading(38.0, 150.0));

        let handle = spawn_timer(
            "indicator",
            INDICATOR_PERIOD,
            IndicatorEvaluator::new(store.clone(), AlertThresholds::default(), probe.clone()),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        // Ticks at 0, 31, 62 and 93 ms, all without a store update in between
        assert_eq!(probe.writes.load(Ordering::SeqCst), 4);
        assert!(probe.on.load(Ordering::SeqCst));
        handle.abort();
    }
}
