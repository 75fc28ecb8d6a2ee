mod config;
mod coordinator;
mod models;
mod sensor;
mod utils;

use log::{error, info};
use tokio::net::TcpListener;

use config::{CoordinatorConfig, NodeConfig, SensorConfig};
use coordinator::{
    display_task, router, spawn_timer, IndicatorEvaluator, LogDisplay, LogIndicator,
    MessageEvaluator, ReadingStore, INDICATOR_PERIOD, MESSAGE_PERIOD,
};
use sensor::{
    bounded, distance_sampler, temperature_sampler, HttpTransport, SimulatedRangeFinder,
    SimulatedThermometer, Transmitter, CHANNEL_CAPACITY,
};
use utils::format_datetime;

/// Sample both quantities and ship combined readings to the coordinator
async fn sensor_node(config: SensorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let transport = HttpTransport::new(&config.coordinator_url)?;

    let (temperature_tx, temperature_rx) = bounded("temperature", CHANNEL_CAPACITY);
    let (distance_tx, distance_rx) = bounded("distance", CHANNEL_CAPACITY);

    tokio::spawn(
        temperature_sampler(
            SimulatedThermometer::new(config.sim_temperature_c),
            temperature_tx,
        )
        .run(),
    );
    tokio::spawn(
        distance_sampler(SimulatedRangeFinder::new(config.sim_echo_us), distance_tx).run(),
    );

    Transmitter::new(temperature_rx, distance_rx, transport)
        .run()
        .await;
    Ok(())
}

/// Receive readings, evaluate alerts and serve the current state
async fn coordinator_node(config: CoordinatorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = ReadingStore::new();

    spawn_timer(
        "alert message",
        MESSAGE_PERIOD,
        MessageEvaluator::new(store.clone(), config.thresholds),
    );
    spawn_timer(
        "indicator",
        INDICATOR_PERIOD,
        IndicatorEvaluator::new(store.clone(), config.thresholds, LogIndicator::new()),
    );
    tokio::spawn(display_task(store.clone(), LogDisplay));

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("Coordinator listening on http://{}", config.listen_addr);

    axum::serve(listener, router(store, config.distance_limit)).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match NodeConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Fridge monitor starting at {}",
        format_datetime(&time::OffsetDateTime::now_utc())
    );

    let node = async move {
        match config {
            NodeConfig::Sensor(config) => sensor_node(config).await,
            NodeConfig::Coordinator(config) => coordinator_node(config).await,
        }
    };

    // Run the node until it fails or Ctrl+C arrives
    tokio::select! {
        result = node => {
            if let Err(e) = result {
                error!("Fatal error: {}", e);
                return Err(e);
            }
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
