//! Timer callbacks: a scheduling class restricted to non-blocking work
//!
//! A callback's `fire` is a plain synchronous function, so it cannot await a
//! channel or the network. It may only read the store and write its own
//! outputs. Each timer keeps its own period and never waits on another.

use log::info;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

pub trait TimerCallback: Send + 'static {
    fn fire(&mut self);
}

/// Run `callback` every `period`, starting immediately
pub fn spawn_timer<C: TimerCallback>(
    name: &'static str,
    period: Duration,
    mut callback: C,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting {} timer (period {:?})", name, period);

        let mut ticker = interval(period);
        // A late tick is not made up for; the next one re-derives current state anyway
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            callback.fire();
        }
    })
}
