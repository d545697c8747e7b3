pub mod error;
pub mod weight;

pub use error::GraphError;
pub use weight::OrderedFloat;
