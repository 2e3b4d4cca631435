pub mod dataset;
pub mod dataset_file;

pub use dataset::Dataset;
pub use dataset_file::{export_csv, export_file_name, load_dataset, write_dataset, write_export};
