pub mod price_memory;

pub use price_memory::PriceMemory;
