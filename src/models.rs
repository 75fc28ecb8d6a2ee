use time::OffsetDateTime;

/// Reported by the temperature filter before its first sample.
pub const TEMPERATURE_NO_DATA: f32 = -1000.0;

/// Reported by the distance filter before its first sample.
pub const DISTANCE_NO_DATA: f32 = -1.0;

/// One combined reading as shipped from the sensor node.
///
/// The two fields come from separate channels and are paired only at
/// transmission time, so either may be older than the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f32,
    pub distance: f32,
}

/// Copy of the coordinator's shared state taken under the store lock.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub temperature: f32,
    pub distance: f32,
    pub alert_message: String,
    pub updated_at: Option<OffsetDateTime>,
}

/// Upper bounds that raise an alert when strictly exceeded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertThresholds {
    /// Degrees Fahrenheit
    pub temperature: f32,
    /// Centimetres
    pub distance: f32,
}

impl AlertThresholds {
    pub fn temperature_exceeded(&self, temperature: f32) -> bool {
        temperature > self.temperature
    }

    pub fn distance_exceeded(&self, distance: f32) -> bool {
        distance > self.distance
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temperature: 40.0,
            distance: 100.0,
        }
    }
}
