pub mod display;
pub mod evaluator;
pub mod indicator;
pub mod ingest;
pub mod server;
pub mod store;
pub mod timer;

pub use display::{display_task, LogDisplay};
pub use evaluator::{IndicatorEvaluator, MessageEvaluator, INDICATOR_PERIOD, MESSAGE_PERIOD};
pub use indicator::LogIndicator;
pub use server::router;
pub use store::ReadingStore;
pub use timer::spawn_timer;
