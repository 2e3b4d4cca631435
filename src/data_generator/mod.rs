pub mod congestion_model;
pub mod generator;
pub mod locations;

pub use generator::{generate_traffic_data, generate_with_seed, summarize, DatasetSummary};
pub use locations::bandung_locations;
