pub mod channel;
pub mod filter;
pub mod sampler;
pub mod source;
pub mod transmitter;
pub mod transport;

pub use channel::{bounded, CHANNEL_CAPACITY};
pub use sampler::{distance_sampler, temperature_sampler};
pub use source::{SimulatedRangeFinder, SimulatedThermometer};
pub use transmitter::Transmitter;
pub use transport::HttpTransport;
