// generator.rs

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::congestion_model::{
    calculate_speed, calculate_volume, draw_congestion_level, round_to, travel_time_index,
};
use crate::shared_data::{CongestionStatus, DayOfWeek, HourOfDay, Location, TrafficObservation};

/// Build the observation for one (date, location, hour).
pub fn generate_observation<R: Rng + ?Sized>(
    date: NaiveDate,
    location: &Location,
    hour: HourOfDay,
    rng: &mut R,
) -> TrafficObservation {
    let weekday = DayOfWeek::from(date.weekday());
    let congestion_level = draw_congestion_level(hour.0, weekday, rng);
    let speed = calculate_speed(location.base_speed, congestion_level, rng);
    let volume = calculate_volume(congestion_level, rng);
    let tti = travel_time_index(speed, location.base_speed);

    TrafficObservation {
        date,
        weekday,
        hour,
        location: location.name.clone(),
        latitude: location.latitude,
        longitude: location.longitude,
        road_type: location.road_type,
        average_speed_kmh: round_to(speed, 1),
        vehicle_volume_per_hour: volume,
        congestion_level,
        travel_time_index: round_to(tti, 2),
        status: CongestionStatus::from_level(congestion_level),
    }
}

/// One row for every (date, location, hour) with `start <= date <= end`.
/// Rows come out ordered by date, then location (reference order), then hour.
pub fn generate_traffic_data<R: Rng + ?Sized>(
    start: NaiveDate,
    end: NaiveDate,
    locations: &[Location],
    rng: &mut R,
) -> Vec<TrafficObservation> {
    let mut data = Vec::new();
    for date in start.iter_days().take_while(|d| *d <= end) {
        for location in locations {
            for hour in HourOfDay::window() {
                data.push(generate_observation(date, location, hour, rng));
            }
        }
    }
    log::debug!(
        "Generated {} observations for {} locations between {} and {}",
        data.len(),
        locations.len(),
        start,
        end
    );
    data
}

/// Seeded entry point. `None` draws the seed from the thread-local generator.
pub fn generate_with_seed(
    start: NaiveDate,
    end: NaiveDate,
    locations: &[Location],
    seed: Option<u64>,
) -> Vec<TrafficObservation> {
    let mut rng = match seed {
        Some(seed) => {
            log::info!("Generating with fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_rng(&mut rand::rng()),
    };
    generate_traffic_data(start, end, locations, &mut rng)
}

/// Console summary of a generated dataset.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub location_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub min_speed: f64,
    pub max_speed: f64,
    pub mean_speed: f64,
    /// Most frequent status first.
    pub status_distribution: Vec<(CongestionStatus, usize)>,
}

pub fn summarize(data: &[TrafficObservation]) -> DatasetSummary {
    let locations: HashSet<&str> = data.iter().map(|o| o.location.as_str()).collect();
    let min_speed = data
        .iter()
        .map(|o| o.average_speed_kmh)
        .fold(f64::INFINITY, f64::min);
    let max_speed = data
        .iter()
        .map(|o| o.average_speed_kmh)
        .fold(f64::NEG_INFINITY, f64::max);
    let mean_speed = if data.is_empty() {
        0.0
    } else {
        data.iter().map(|o| o.average_speed_kmh).sum::<f64>() / data.len() as f64
    };

    let mut counts: BTreeMap<CongestionStatus, usize> = BTreeMap::new();
    for obs in data {
        *counts.entry(obs.status).or_insert(0) += 1;
    }
    let mut status_distribution: Vec<_> = counts.into_iter().collect();
    status_distribution.sort_by(|a, b| b.1.cmp(&a.1));

    DatasetSummary {
        total_records: data.len(),
        location_count: locations.len(),
        first_date: data.iter().map(|o| o.date).min(),
        last_date: data.iter().map(|o| o.date).max(),
        min_speed,
        max_speed,
        mean_speed,
        status_distribution,
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Total Records: {}", self.total_records)?;
        writeln!(f, "Locations: {}", self.location_count)?;
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => writeln!(f, "Date Range: {} to {}", first, last)?,
            _ => writeln!(f, "Date Range: -")?,
        }
        if self.total_records > 0 {
            writeln!(f, "\nAverage Speed:")?;
            writeln!(f, "  - Minimum: {:.1} km/h", self.min_speed)?;
            writeln!(f, "  - Maximum: {:.1} km/h", self.max_speed)?;
            writeln!(f, "  - Mean: {:.1} km/h", self.mean_speed)?;
        }
        writeln!(f, "\nCongestion Status Distribution:")?;
        for (status, count) in &self.status_distribution {
            writeln!(f, "  {:<15} {}", status.label(), count)?;
        }
        Ok(())
    }
}
