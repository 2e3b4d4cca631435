pub mod analytics;
pub mod data_generator;
pub mod errors;
pub mod global_variables;
pub mod reporting;
pub mod settings;
pub mod shared_data;
pub mod storage;
