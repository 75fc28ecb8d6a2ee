//! Binary alert output driven by the indicator evaluator

use log::info;

pub trait IndicatorOutput: Send + 'static {
    fn set(&mut self, on: bool);
}

/// Stand-in for the alert light that logs each on/off transition
#[derive(Debug, Default)]
pub struct LogIndicator {
    lit: Option<bool>,
}

impl LogIndicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IndicatorOutput for LogIndicator {
    fn set(&mut self, on: bool) {
        if self.lit != Some(on) {
            info!("Indicator {}", if on { "ON" } else { "OFF" });
            self.lit = Some(on);
        }
    }
}
