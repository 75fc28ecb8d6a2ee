//! Local two-line display fed from the shared store

use log::info;
use tokio::time::{sleep, Duration};

use crate::coordinator::store::ReadingStore;
use crate::models::{Reading, DISTANCE_NO_DATA, TEMPERATURE_NO_DATA};
use crate::utils::format_value;

const DISPLAY_PERIOD: Duration = Duration::from_millis(2000);

pub trait DisplaySurface: Send + 'static {
    fn show(&mut self, lines: &[String; 2]);
}

/// Writes the display lines to the log instead of a panel
#[derive(Debug, Default)]
pub struct LogDisplay;

impl DisplaySurface for LogDisplay {
    fn show(&mut self, lines: &[String; 2]) {
        info!("[display] {} | {}", lines[0], lines[1]);
    }
}

pub fn render_lines(reading: &Reading) -> [String; 2] {
    [
        format!("Temp: {} F", format_value(reading.temperature, TEMPERATURE_NO_DATA)),
        format!("Dist: {} cm", format_value(reading.distance, DISTANCE_NO_DATA)),
    ]
}

/// Redraw the display from the store every period; read-only
pub async fn display_task<D: DisplaySurface>(store: ReadingStore, mut surface: D) {
    info!("Starting display task (period {:?})", DISPLAY_PERIOD);

    loop {
        surface.show(&render_lines(&store.reading()));
        sleep(DISPLAY_PERIOD).await;
    }
}
