use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::shared_data::{DayOfWeek, TrafficObservation};

/// Immutable in-memory table of observations, loaded once and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<TrafficObservation>,
}

impl Dataset {
    pub fn new(observations: Vec<TrafficObservation>) -> Self {
        Self { observations }
    }

    pub fn observations(&self) -> &[TrafficObservation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Distinct location names in order of first appearance.
    pub fn locations(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut names = Vec::new();
        for obs in &self.observations {
            if seen.insert(obs.location.as_str()) {
                names.push(obs.location.clone());
            }
        }
        names
    }

    /// Weekdays present, Monday first.
    pub fn weekdays(&self) -> BTreeSet<DayOfWeek> {
        self.observations.iter().map(|o| o.weekday).collect()
    }

    /// First and last date, `None` when empty.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.observations.iter().map(|o| o.date).min()?;
        let last = self.observations.iter().map(|o| o.date).max()?;
        Some((first, last))
    }

    /// Every row, as the view type the analytics functions take.
    pub fn all_rows(&self) -> Vec<&TrafficObservation> {
        self.observations.iter().collect()
    }
}
