use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::analytics::{DisplayConfig, SortDirection, SortField};
use crate::errors::SettingsError;
use crate::global_variables::{
    DEFAULT_CHART_DIR, DEFAULT_DATASET_FILE, DEFAULT_ROW_LIMIT, DEFAULT_SPAN_DAYS,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppSettings {
    pub generator: GeneratorSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    pub output_path: String,
    /// Span ending today, used when no explicit dates are given.
    pub days: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub seed: Option<u64>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_DATASET_FILE.to_string(),
            days: DEFAULT_SPAN_DAYS,
            start_date: None,
            end_date: None,
            seed: None,
        }
    }
}

impl GeneratorSettings {
    /// Inclusive generation window. Missing ends are filled from `today` and `days`.
    pub fn date_range(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), SettingsError> {
        if self.days < 0 {
            return Err(SettingsError::Invalid(format!(
                "days must not be negative, got {}",
                self.days
            )));
        }
        let out_of_range = || {
            SettingsError::Invalid(format!("days = {} leaves the calendar range", self.days))
        };
        let span = Duration::try_days(self.days).ok_or_else(out_of_range)?;
        let (start, end) = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (
                start,
                start.checked_add_signed(span).ok_or_else(out_of_range)?,
            ),
            (None, Some(end)) => (end.checked_sub_signed(span).ok_or_else(out_of_range)?, end),
            (None, None) => (today.checked_sub_signed(span).ok_or_else(out_of_range)?, today),
        };
        if end < start {
            return Err(SettingsError::Invalid(format!(
                "end date {} is before start date {}",
                end, start
            )));
        }
        Ok((start, end))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub dataset_path: String,
    pub export_dir: String,
    pub chart_dir: String,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub row_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET_FILE.to_string(),
            export_dir: ".".to_string(),
            chart_dir: DEFAULT_CHART_DIR.to_string(),
            sort_field: SortField::Date,
            sort_direction: SortDirection::Ascending,
            row_limit: DEFAULT_ROW_LIMIT,
        }
    }
}

impl DashboardSettings {
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig::new(self.sort_field, self.sort_direction, self.row_limit)
    }
}

impl AppSettings {
    /// Read settings from a TOML file. A missing file means defaults.
    pub fn load(filename: &str) -> Result<Self, SettingsError> {
        if !Path::new(filename).exists() {
            log::info!("No settings file at '{}', using defaults", filename);
            return Ok(AppSettings::default());
        }
        let toml_contents = fs::read_to_string(filename)?;
        AppSettings::parse(&toml_contents)
    }

    pub fn parse(toml_contents: &str) -> Result<Self, SettingsError> {
        let settings = toml::from_str::<AppSettings>(toml_contents)?;
        Ok(settings)
    }
}

impl fmt::Display for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Dataset: {}\n\tGenerator span (days): {}\n\tSeed: {:?}\n\tExport dir: {}\n\tChart dir: {}\n\tSort: {} {:?}, {} rows",
            self.generator.output_path,
            self.generator.days,
            self.generator.seed,
            self.dashboard.export_dir,
            self.dashboard.chart_dir,
            self.dashboard.sort_field,
            self.dashboard.sort_direction,
            self.dashboard.row_limit,
        )
    }
}
