use log::info;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::models::AlertThresholds;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DISTANCE_LIMIT: f32 = 300.0;
const DEFAULT_SIM_TEMPERATURE_C: f32 = 4.0;
const DEFAULT_SIM_ECHO_US: f32 = 580.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorConfig {
    pub coordinator_url: Url,
    pub sim_temperature_c: f32,
    pub sim_echo_us: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorConfig {
    pub listen_addr: SocketAddr,
    pub thresholds: AlertThresholds,
    pub distance_limit: f32,
}

/// Which half of the system this process runs
#[derive(Debug, Clone, PartialEq)]
pub enum NodeConfig {
    Sensor(SensorConfig),
    Coordinator(CoordinatorConfig),
}

impl NodeConfig {
    pub fn new() -> Result<Self, ConfigError> {
        // Load environment variables
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let role = lookup("NODE_ROLE").ok_or(ConfigError::Missing("NODE_ROLE"))?;

        match role.trim().to_lowercase().as_str() {
            "sensor" => {
                let raw_url =
                    lookup("COORDINATOR_URL").ok_or(ConfigError::Missing("COORDINATOR_URL"))?;
                let coordinator_url =
                    Url::parse(raw_url.trim()).map_err(|_| ConfigError::Invalid {
                        key: "COORDINATOR_URL",
                        value: raw_url.clone(),
                    })?;

                let config = SensorConfig {
                    coordinator_url,
                    sim_temperature_c: number_or(
                        &lookup,
                        "SIM_TEMPERATURE_C",
                        DEFAULT_SIM_TEMPERATURE_C,
                    )?,
                    sim_echo_us: number_or(&lookup, "SIM_ECHO_US", DEFAULT_SIM_ECHO_US)?,
                };
                info!("Sensor node reporting to {}", config.coordinator_url);
                Ok(NodeConfig::Sensor(config))
            }
            "coordinator" => {
                let raw_addr =
                    lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
                let listen_addr =
                    raw_addr
                        .trim()
                        .parse::<SocketAddr>()
                        .map_err(|_| ConfigError::Invalid {
                            key: "LISTEN_ADDR",
                            value: raw_addr.clone(),
                        })?;

                let defaults = AlertThresholds::default();
                let thresholds = AlertThresholds {
                    temperature: number_or(&lookup, "TEMPERATURE_THRESHOLD", defaults.temperature)?,
                    distance: number_or(&lookup, "DISTANCE_THRESHOLD", defaults.distance)?,
                };
                let distance_limit = number_or(&lookup, "DISTANCE_LIMIT", DEFAULT_DISTANCE_LIMIT)?;

                info!(
                    "Coordinator thresholds: temperature > {:.1} F, distance > {:.1} cm, clamp at {:.1} cm",
                    thresholds.temperature, thresholds.distance, distance_limit
                );
                Ok(NodeConfig::Coordinator(CoordinatorConfig {
                    listen_addr,
                    thresholds,
                    distance_limit,
                }))
            }
            _ => Err(ConfigError::Invalid {
                key: "NODE_ROLE",
                value: role,
            }),
        }
    }
}

fn number_or<F>(lookup: &F, key: &'static str, default: f32) -> Result<f32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ConfigError::Invalid { key, value: raw }),
        },
    }
}
