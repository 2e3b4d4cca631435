// src/shared_data.rs

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::global_variables::{FIRST_HOUR, LAST_HOUR, MAX_CONGESTION};

/// Road category of a monitored location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoadType {
    #[serde(rename = "Main Road")]
    MainRoad,
    #[serde(rename = "Tourist Road")]
    TouristRoad,
    #[serde(rename = "Suburban Road")]
    SuburbanRoad,
    #[serde(rename = "City Center Road")]
    CityCenterRoad,
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            RoadType::MainRoad => "Main Road",
            RoadType::TouristRoad => "Tourist Road",
            RoadType::SuburbanRoad => "Suburban Road",
            RoadType::CityCenterRoad => "City Center Road",
        };
        write!(f, "{}", label)
    }
}

/// A monitored road segment. The reference set is fixed when the generator starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub road_type: RoadType,
    /// Free-flow speed in km/h.
    pub base_speed: f64,
}

impl Location {
    pub fn new(name: &str, latitude: f64, longitude: f64, road_type: RoadType, base_speed: f64) -> Self {
        Self {
            name: name.to_string(),
            latitude,
            longitude,
            road_type,
            base_speed,
        }
    }
}

/// Day of the week. The derived ordering is the fixed Monday..Sunday display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        DayOfWeek::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayOfWeek::ALL
            .iter()
            .copied()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown weekday '{}'", s))
    }
}

/// Hour of the day, stored as a number and written as "HH:00".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourOfDay(pub u8);

impl HourOfDay {
    /// Every hour of the observation window, in order.
    pub fn window() -> impl Iterator<Item = HourOfDay> {
        (FIRST_HOUR..=LAST_HOUR).map(HourOfDay)
    }
}

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for HourOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hour = s
            .strip_suffix(":00")
            .and_then(|h| h.parse::<u8>().ok())
            .filter(|h| *h < 24)
            .ok_or_else(|| format!("invalid hour '{}', expected HH:00", s))?;
        Ok(HourOfDay(hour))
    }
}

impl Serialize for HourOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HourOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Descriptive label derived from the congestion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CongestionStatus {
    #[serde(rename = "Very Free")]
    VeryFree,
    #[serde(rename = "Free")]
    Free,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Congested")]
    Congested,
    #[serde(rename = "Very Congested")]
    VeryCongested,
}

impl CongestionStatus {
    pub const ALL: [CongestionStatus; 5] = [
        CongestionStatus::VeryFree,
        CongestionStatus::Free,
        CongestionStatus::Moderate,
        CongestionStatus::Congested,
        CongestionStatus::VeryCongested,
    ];

    /// Five fixed bins over the 1..=10 scale.
    pub fn from_level(level: u8) -> Self {
        match level {
            0..=2 => CongestionStatus::VeryFree,
            3..=4 => CongestionStatus::Free,
            5..=6 => CongestionStatus::Moderate,
            7..=8 => CongestionStatus::Congested,
            _ => CongestionStatus::VeryCongested,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CongestionStatus::VeryFree => "Very Free",
            CongestionStatus::Free => "Free",
            CongestionStatus::Moderate => "Moderate",
            CongestionStatus::Congested => "Congested",
            CongestionStatus::VeryCongested => "Very Congested",
        }
    }
}

impl fmt::Display for CongestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One dataset row: conditions at one location during one hour of one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficObservation {
    pub date: NaiveDate,
    pub weekday: DayOfWeek,
    pub hour: HourOfDay,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub road_type: RoadType,
    pub average_speed_kmh: f64,
    pub vehicle_volume_per_hour: u32,
    pub congestion_level: u8,
    pub travel_time_index: f64,
    pub status: CongestionStatus,
}

impl TrafficObservation {
    /// First way this row disagrees with the artifact's derived columns, if any.
    pub fn inconsistency(&self) -> Option<String> {
        if !(1..=MAX_CONGESTION).contains(&self.congestion_level) {
            return Some(format!(
                "congestion level {} outside 1..={}",
                self.congestion_level, MAX_CONGESTION
            ));
        }
        let status = CongestionStatus::from_level(self.congestion_level);
        if self.status != status {
            return Some(format!(
                "status '{}' does not match level {} ('{}')",
                self.status, self.congestion_level, status
            ));
        }
        let weekday = DayOfWeek::from(self.date.weekday());
        if self.weekday != weekday {
            return Some(format!("{} is a {}, not a {}", self.date, weekday, self.weekday));
        }
        if !(FIRST_HOUR..=LAST_HOUR).contains(&self.hour.0) {
            return Some(format!("hour {} outside the observation window", self.hour));
        }
        None
    }
}
