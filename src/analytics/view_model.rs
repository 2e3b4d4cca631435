// view_model.rs
//
// Everything a front end needs for one redraw, computed from the dataset, the
// current filters and the display options.

use serde::Serialize;

use super::aggregations::{
    daily_trend, hour_weekday_matrix, location_detail, location_stats, rank_locations, rush_hours,
    summary_metrics, top_rush_hours, weekday_congestion, weekday_vs_weekend, CongestionMatrix,
    DailyTrend, DayTypeComparison, HourlyProfile, LocationDetail, LocationStats, SummaryMetrics,
    WeekdayCongestion,
};
use super::filters::{apply_filters, FilterState};
use super::records::{sort_records, DisplayConfig};
use crate::shared_data::TrafficObservation;
use crate::storage::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Selection {
    Rows(usize),
    /// Filters matched nothing; every view below is empty.
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewModel<'a> {
    pub selection: Selection,
    pub summary: SummaryMetrics,
    pub daily_trend: Vec<DailyTrend>,
    pub weekday_congestion: Vec<WeekdayCongestion>,
    pub hour_weekday: CongestionMatrix,
    /// Map markers, by location name.
    pub location_map: Vec<LocationStats>,
    /// Same statistics ranked worst first, for the location table.
    pub location_table: Vec<LocationStats>,
    pub location_detail: Option<LocationDetail>,
    pub rush_hours: Vec<HourlyProfile>,
    pub top_rush_hours: Vec<HourlyProfile>,
    pub day_type_comparison: DayTypeComparison,
    pub records: Vec<&'a TrafficObservation>,
    #[serde(skip)]
    pub filtered: Vec<&'a TrafficObservation>,
}

impl ViewModel<'_> {
    pub fn is_empty(&self) -> bool {
        self.selection == Selection::Empty
    }
}

/// Pure redraw: the same inputs always give the same view.
pub fn render<'a>(dataset: &'a Dataset, filter: &FilterState, display: &DisplayConfig) -> ViewModel<'a> {
    let baseline = dataset.all_rows();
    let filtered = apply_filters(dataset, filter);
    let selection = if filtered.is_empty() {
        log::warn!("Current filters match no observations");
        Selection::Empty
    } else {
        Selection::Rows(filtered.len())
    };

    let location_map = location_stats(&filtered);
    let location_table = rank_locations(&location_map);

    let detail_location = display
        .selected_location
        .clone()
        .filter(|name| filter.locations.contains(name))
        .or_else(|| filtered.first().map(|o| o.location.clone()));
    let location_detail = detail_location.map(|name| location_detail(&filtered, &name));

    let ranked_hours = rush_hours(&filtered);
    let top_hours = top_rush_hours(&ranked_hours);

    let records = sort_records(
        &filtered,
        display.sort_field,
        display.direction,
        display.row_limit(),
    );

    ViewModel {
        selection,
        summary: summary_metrics(&filtered, &baseline),
        daily_trend: daily_trend(&filtered),
        weekday_congestion: weekday_congestion(&filtered),
        hour_weekday: hour_weekday_matrix(&filtered),
        location_map,
        location_table,
        location_detail,
        rush_hours: ranked_hours,
        top_rush_hours: top_hours,
        day_type_comparison: weekday_vs_weekend(&filtered),
        records,
        filtered,
    }
}

/// JSON form of the view for an external UI binding.
pub fn to_json(view: &ViewModel<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::records::{SortDirection, SortField};
    use crate::data_generator::{bandung_locations, generate_with_seed};
    use crate::shared_data::DayOfWeek;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let start = NaiveDate::from_ymd_opt(2026, 2, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        Dataset::new(generate_with_seed(start, end, &bandung_locations(), Some(33)))
    }

    #[test]
    fn full_selection_has_zero_deltas() {
        let dataset = dataset();
        let filter = FilterState::select_all(&dataset).unwrap();
        let view = render(&dataset, &filter, &DisplayConfig::default());
        assert_eq!(view.selection, Selection::Rows(dataset.len()));
        assert!(view.summary.mean_congestion.delta.unwrap().abs() < 1e-9);
        assert_eq!(view.daily_trend.len(), 14);
        assert_eq!(view.weekday_congestion.len(), 7);
        assert_eq!(view.hour_weekday.hours.len(), 17);
        assert_eq!(view.location_map.len(), 10);
        assert_eq!(view.rush_hours.len(), 17);
        assert_eq!(view.top_rush_hours.len(), 5);
        assert_eq!(view.records.len(), 100);
        assert_eq!(view.filtered.len(), dataset.len());
        assert_eq!(
            view.location_detail.as_ref().map(|d| d.location.as_str()),
            Some("Jalan Pasteur")
        );
    }

    #[test]
    fn rendering_twice_gives_the_same_view() {
        let dataset = dataset();
        let mut filter = FilterState::select_all(&dataset).unwrap();
        filter.weekdays = [DayOfWeek::Monday, DayOfWeek::Sunday].into_iter().collect();
        let display = DisplayConfig::new(SortField::Volume, SortDirection::Descending, 20);
        let a = to_json(&render(&dataset, &filter, &display)).unwrap();
        let b = to_json(&render(&dataset, &filter, &display)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_selection_renders_empty_views() {
        let dataset = dataset();
        let mut filter = FilterState::select_all(&dataset).unwrap();
        filter.locations.clear();
        let view = render(&dataset, &filter, &DisplayConfig::default());
        assert!(view.is_empty());
        assert_eq!(view.summary.mean_speed.value, None);
        assert!(view.daily_trend.is_empty());
        assert!(view.location_detail.is_none());
        assert!(view.records.is_empty());
        assert!(view.day_type_comparison.weekend.is_empty());
        assert!(to_json(&view).unwrap().contains("\"Empty\""));
    }

    #[test]
    fn selected_location_drives_the_detail_view() {
        let dataset = dataset();
        let filter = FilterState::select_all(&dataset).unwrap();
        let mut display = DisplayConfig::default();
        display.selected_location = Some("Jalan Riau".to_string());
        let view = render(&dataset, &filter, &display);
        let detail = view.location_detail.unwrap();
        assert_eq!(detail.location, "Jalan Riau");
        assert_eq!(detail.hourly_speed.len(), 17);
        let counted: usize = detail.status_distribution.iter().map(|(_, n)| n).sum();
        assert_eq!(counted, 14 * 17);
    }

    #[test]
    fn weekend_only_selection_has_no_weekday_series() {
        let dataset = dataset();
        let mut filter = FilterState::select_all(&dataset).unwrap();
        filter.weekdays = [DayOfWeek::Saturday, DayOfWeek::Sunday].into_iter().collect();
        let view = render(&dataset, &filter, &DisplayConfig::default());
        assert!(view.day_type_comparison.weekday.is_empty());
        assert_eq!(view.day_type_comparison.weekend.len(), 17);
        assert_eq!(view.hour_weekday.weekdays, vec![DayOfWeek::Saturday, DayOfWeek::Sunday]);
    }
}
