//! Periodic shipping of combined readings to the coordinator

use log::{info, warn};
use tokio::time::{sleep, Duration};

use crate::models::{Reading, DISTANCE_NO_DATA, TEMPERATURE_NO_DATA};
use crate::sensor::channel::ReadingReceiver;
use crate::sensor::transport::{HttpTransport, TransportError};

const TRANSMIT_PERIOD: Duration = Duration::from_millis(1000);
const RECEIVE_TIMEOUT: Duration = Duration::from_millis(100);

/// Pairs the latest temperature and distance and submits them once per period
///
/// A channel that yields nothing within its wait leaves the previous value
/// in place, so a reading may be resent stale for a cycle rather than
/// blocking. Failed submissions are logged and left to the next cycle.
pub struct Transmitter {
    temperature_rx: ReadingReceiver,
    distance_rx: ReadingReceiver,
    transport: HttpTransport,
    current: Reading,
}

impl Transmitter {
    pub fn new(
        temperature_rx: ReadingReceiver,
        distance_rx: ReadingReceiver,
        transport: HttpTransport,
    ) -> Self {
        Self {
            temperature_rx,
            distance_rx,
            transport,
            current: Reading {
                temperature: TEMPERATURE_NO_DATA,
                distance: DISTANCE_NO_DATA,
            },
        }
    }

    /// Refresh both values from their channels, keeping old ones on timeout
    pub async fn collect(&mut self) -> Reading {
        self.temperature_rx
            .receive_latest(&mut self.current.temperature, RECEIVE_TIMEOUT)
            .await;
        self.distance_rx
            .receive_latest(&mut self.current.distance, RECEIVE_TIMEOUT)
            .await;
        self.current
    }

    /// One cycle without the trailing sleep
    pub async fn transmit_once(&mut self) -> Result<Reading, TransportError> {
        let reading = self.collect().await;
        self.transport.submit(&reading).await?;
        Ok(reading)
    }

    pub async fn run(mut self) {
        info!(
            "Starting transmitter to {} (period {:?})",
            self.transport.endpoint(),
            TRANSMIT_PERIOD
        );

        loop {
            match self.transmit_once().await {
                Ok(reading) => info!(
                    "Sent reading: temperature={:.2} F, distance={:.2} cm",
                    reading.temperature, reading.distance
                ),
                Err(e) => warn!("Failed to send reading: {}", e),
            }

            sleep(TRANSMIT_PERIOD).await;
        }
    }
}
