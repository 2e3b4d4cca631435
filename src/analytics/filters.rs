// filters.rs

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::shared_data::{DayOfWeek, TrafficObservation};
use crate::storage::Dataset;

/// User-selected subset criteria. Transient; rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub locations: BTreeSet<String>,
    pub weekdays: BTreeSet<DayOfWeek>,
}

impl FilterState {
    /// Full date span, every location and every weekday found in the dataset.
    pub fn select_all(dataset: &Dataset) -> Option<Self> {
        let (start_date, end_date) = dataset.date_bounds()?;
        Some(Self {
            start_date,
            end_date,
            locations: dataset.locations().into_iter().collect(),
            weekdays: dataset.weekdays(),
        })
    }

    /// Date inside the inclusive range, location and weekday selected.
    /// Empty location or weekday sets select nothing.
    pub fn matches(&self, obs: &TrafficObservation) -> bool {
        obs.date >= self.start_date
            && obs.date <= self.end_date
            && self.locations.contains(&obs.location)
            && self.weekdays.contains(&obs.weekday)
    }
}

pub fn apply_filters<'a>(dataset: &'a Dataset, filter: &FilterState) -> Vec<&'a TrafficObservation> {
    let rows: Vec<_> = dataset
        .observations()
        .iter()
        .filter(|obs| filter.matches(obs))
        .collect();
    log::debug!("Filter kept {} of {} rows", rows.len(), dataset.len());
    rows
}
