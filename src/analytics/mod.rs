pub mod aggregations;
pub mod filters;
pub mod records;
pub mod view_model;

pub use filters::{apply_filters, FilterState};
pub use records::{sort_records, DisplayConfig, SortDirection, SortField};
pub use view_model::{render, to_json, Selection, ViewModel};
