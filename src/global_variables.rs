// Observation window, inclusive on both ends (06:00 .. 22:00).
pub const FIRST_HOUR: u8 = 6;
pub const LAST_HOUR: u8 = 22;

// Congestion scale
pub const MAX_CONGESTION: u8 = 10;

// Generator floors and jitter
pub const MIN_SPEED_KMH: f64 = 5.0;
pub const MAX_SPEED_REDUCTION: f64 = 0.7;
pub const SPEED_JITTER: f64 = 0.1;
pub const VOLUME_PER_CONGESTION_LEVEL: i64 = 300;
pub const VOLUME_JITTER: i64 = 100;
pub const MIN_VOLUME: u32 = 100;

// Record view bounds
pub const MIN_ROW_LIMIT: usize = 10;
pub const MAX_ROW_LIMIT: usize = 1000;
pub const DEFAULT_ROW_LIMIT: usize = 100;

pub const RUSH_HOUR_TOP_N: usize = 5;
pub const MARKER_SIZE_FACTOR: f64 = 5.0;

// Files
pub const DEFAULT_SETTINGS_FILE: &str = "congestion.toml";
pub const DEFAULT_DATASET_FILE: &str = "traffic_congestion.csv";
pub const DEFAULT_CHART_DIR: &str = "charts";
pub const DEFAULT_SPAN_DAYS: i64 = 30;
pub const EXPORT_FILE_PREFIX: &str = "traffic_congestion_";
