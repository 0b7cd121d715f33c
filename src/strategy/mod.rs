pub mod report;
pub mod spike;

pub use report::{PriceLine, TickReport};
pub use spike::SpikeDetector;
