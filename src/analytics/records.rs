// records.rs
//
// Sortable, truncated record view of the filtered rows.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::global_variables::{DEFAULT_ROW_LIMIT, MAX_ROW_LIMIT, MIN_ROW_LIMIT};
use crate::shared_data::TrafficObservation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Congestion,
    Speed,
    Volume,
}

impl SortField {
    fn compare(self, a: &TrafficObservation, b: &TrafficObservation) -> Ordering {
        match self {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Congestion => a.congestion_level.cmp(&b.congestion_level),
            SortField::Speed => a.average_speed_kmh.total_cmp(&b.average_speed_kmh),
            SortField::Volume => a.vehicle_volume_per_hour.cmp(&b.vehicle_volume_per_hour),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "congestion" => Ok(SortField::Congestion),
            "speed" => Ok(SortField::Speed),
            "volume" => Ok(SortField::Volume),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SortField::Date => "date",
            SortField::Congestion => "congestion",
            SortField::Speed => "speed",
            SortField::Volume => "volume",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// How the record table is shown. The row limit is clamped into [10, 1000].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayConfig {
    pub sort_field: SortField,
    pub direction: SortDirection,
    row_limit: usize,
    /// Location for the detail view; `None` picks the first filtered location.
    pub selected_location: Option<String>,
}

impl DisplayConfig {
    pub fn new(sort_field: SortField, direction: SortDirection, row_limit: usize) -> Self {
        Self {
            sort_field,
            direction,
            row_limit: clamp_row_limit(row_limit),
            selected_location: None,
        }
    }

    pub fn row_limit(&self) -> usize {
        self.row_limit
    }

    pub fn set_row_limit(&mut self, row_limit: usize) {
        self.row_limit = clamp_row_limit(row_limit);
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig::new(SortField::Date, SortDirection::Ascending, DEFAULT_ROW_LIMIT)
    }
}

pub fn clamp_row_limit(row_limit: usize) -> usize {
    row_limit.clamp(MIN_ROW_LIMIT, MAX_ROW_LIMIT)
}

/// Stable sort by `field`, then keep the first `limit` rows.
/// Equal keys keep their input order in both directions.
pub fn sort_records<'a>(
    rows: &[&'a TrafficObservation],
    field: SortField,
    direction: SortDirection,
    limit: usize,
) -> Vec<&'a TrafficObservation> {
    let mut sorted = rows.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| field.compare(a, b)),
        SortDirection::Descending => sorted.sort_by(|a, b| field.compare(b, a)),
    }
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_data::{CongestionStatus, DayOfWeek, HourOfDay, RoadType};
    use chrono::NaiveDate;

    fn row(hour: u8, volume: u32, speed: f64) -> TrafficObservation {
        TrafficObservation {
            date: NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
            weekday: DayOfWeek::Monday,
            hour: HourOfDay(hour),
            location: "Jalan Kopo".to_string(),
            latitude: -6.9667,
            longitude: 107.5667,
            road_type: RoadType::MainRoad,
            average_speed_kmh: speed,
            vehicle_volume_per_hour: volume,
            congestion_level: 5,
            travel_time_index: 28.0 / speed,
            status: CongestionStatus::Moderate,
        }
    }

    #[test]
    fn top_three_by_volume_descending() {
        let data = vec![
            row(6, 900, 20.0),
            row(7, 2400, 10.0),
            row(8, 1500, 15.0),
            row(9, 2400, 11.0),
            row(10, 3000, 8.0),
        ];
        let rows: Vec<_> = data.iter().collect();
        let top = sort_records(&rows, SortField::Volume, SortDirection::Descending, 3);
        let hours: Vec<u8> = top.iter().map(|o| o.hour.0).collect();
        // 07:00 and 09:00 tie on volume and keep input order.
        assert_eq!(hours, vec![10, 7, 9]);
    }

    #[test]
    fn ascending_speed_and_limit_larger_than_input() {
        let data = vec![row(6, 900, 20.0), row(7, 2400, 10.0), row(8, 1500, 15.0)];
        let rows: Vec<_> = data.iter().collect();
        let sorted = sort_records(&rows, SortField::Speed, SortDirection::Ascending, 100);
        let speeds: Vec<f64> = sorted.iter().map(|o| o.average_speed_kmh).collect();
        assert_eq!(speeds, vec![10.0, 15.0, 20.0]);
    }

    #[test]
    fn display_limit_is_clamped() {
        assert_eq!(DisplayConfig::new(SortField::Date, SortDirection::Ascending, 3).row_limit(), 10);
        assert_eq!(DisplayConfig::new(SortField::Date, SortDirection::Ascending, 5000).row_limit(), 1000);
        let mut config = DisplayConfig::default();
        assert_eq!(config.row_limit(), 100);
        config.set_row_limit(250);
        assert_eq!(config.row_limit(), 250);
    }

    #[test]
    fn sort_options_parse_from_text() {
        assert_eq!("Volume".parse::<SortField>(), Ok(SortField::Volume));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert!("weight".parse::<SortField>().is_err());
    }
}
