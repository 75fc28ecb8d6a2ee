//! Unit conversions and formatting shared by both nodes

use time::format_description::well_known::Rfc3339;
use time::{format_description, OffsetDateTime};

/// Speed of sound expressed as microseconds per centimetre
const MICROS_PER_CM: f32 = 29.1;

/// Convert a raw Celsius reading into the display unit (Fahrenheit)
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

/// Convert an ultrasonic echo round-trip duration into a one-way distance
///
/// The pulse travels to the obstacle and back, so the duration is halved
/// before dividing by the time sound needs to cover one centimetre.
pub fn echo_to_centimetres(round_trip_us: f32) -> f32 {
    round_trip_us / 2.0 / MICROS_PER_CM
}

/// Format a timestamp for human-readable logging
///
/// Converts an OffsetDateTime to DD.MM.YYYY - HH:MM:SS format
/// Falls back to default string representation if formatting fails.
pub fn format_datetime(dt: &OffsetDateTime) -> String {
    match format_description::parse("[day].[month].[year] - [hour]:[minute]:[second]") {
        Ok(format) => dt.format(&format).unwrap_or_else(|_| dt.to_string()),
        Err(_) => dt.to_string(),
    }
}

/// Format a timestamp for machine consumers of the status endpoint
pub fn format_rfc3339(dt: &OffsetDateTime) -> String {
    dt.format(&Rfc3339).unwrap_or_else(|_| dt.to_string())
}

/// Render a value with one decimal, or `--` when it carries a no-data sentinel
pub fn format_value(value: f32, no_data: f32) -> String {
    if value == no_data {
        "--".to_string()
    } else {
        format!("{:.1}", value)
    }
}
