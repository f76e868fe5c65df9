pub mod generator;
pub mod stats;

pub use generator::{generate_summary, write_summary};
