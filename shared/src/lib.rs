pub mod coerce;
pub mod stock;
pub mod types;

pub use stock::*;
pub use types::*;
