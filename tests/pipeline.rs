use bandung_congestion::analytics::{
    render, to_json, DisplayConfig, FilterState, Selection, SortDirection, SortField,
};
use bandung_congestion::data_generator::{bandung_locations, generate_with_seed};
use bandung_congestion::errors::LoadError;
use bandung_congestion::shared_data::{CongestionStatus, DayOfWeek, HourOfDay};
use bandung_congestion::storage::{export_csv, load_dataset, write_dataset, write_export};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fs;

fn temp_path(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("bandung_pipeline_{}_{}", std::process::id(), name))
        .to_string_lossy()
        .into_owned()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn generated_artifact_feeds_the_dashboard() {
    let path = temp_path("artifact.csv");
    let locations = bandung_locations();
    let data = generate_with_seed(date(2026, 1, 5), date(2026, 1, 18), &locations, Some(2026));
    write_dataset(&path, &data).unwrap();

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.len(), 14 * 10 * 17);

    let keys: HashSet<_> = dataset
        .observations()
        .iter()
        .map(|o| (o.date, o.location.as_str(), o.hour))
        .collect();
    assert_eq!(keys.len(), dataset.len());

    let filter = FilterState::select_all(&dataset).unwrap();
    let view = render(&dataset, &filter, &DisplayConfig::default());
    assert_eq!(view.selection, Selection::Rows(dataset.len()));
    assert_eq!(
        view.weekday_congestion.iter().map(|w| w.weekday).collect::<Vec<_>>(),
        DayOfWeek::ALL.to_vec()
    );
    // Weekday evening rush can never drop below 8.
    let weekday_evening = view
        .hour_weekday
        .get(HourOfDay(18), DayOfWeek::Wednesday)
        .unwrap();
    assert!(weekday_evening >= 8.0);
    for stats in &view.location_map {
        assert!((stats.marker_size - stats.mean_congestion * 5.0).abs() < 1e-9);
    }

    fs::remove_file(&path).ok();
}

#[test]
fn narrowed_filters_change_every_view() {
    let data = generate_with_seed(date(2026, 1, 5), date(2026, 1, 18), &bandung_locations(), Some(9));
    let dataset = bandung_congestion::storage::Dataset::new(data);

    let mut filter = FilterState::select_all(&dataset).unwrap();
    filter.start_date = date(2026, 1, 10);
    filter.end_date = date(2026, 1, 11);
    filter.locations = ["Jalan Dago".to_string(), "Jalan Riau".to_string()]
        .into_iter()
        .collect();

    let display = DisplayConfig::new(SortField::Congestion, SortDirection::Descending, 10);
    let view = render(&dataset, &filter, &display);

    // 2026-01-10 and 2026-01-11 are a Saturday and a Sunday.
    assert_eq!(view.selection, Selection::Rows(2 * 2 * 17));
    assert!(view.day_type_comparison.weekday.is_empty());
    assert_eq!(view.location_map.len(), 2);
    assert_eq!(view.records.len(), 10);
    assert!(view
        .records
        .windows(2)
        .all(|w| w[0].congestion_level >= w[1].congestion_level));
    // Weekend levels top out at 8.
    assert!(view.records.iter().all(|o| o.congestion_level <= 8));
    assert!(view.summary.mean_congestion.delta.is_some());
    assert!(view
        .location_map
        .iter()
        .all(|s| s.dominant_status != CongestionStatus::VeryCongested));
}

#[test]
fn export_holds_exactly_the_filtered_rows() {
    let dataset = bandung_congestion::storage::Dataset::new(generate_with_seed(
        date(2026, 2, 2),
        date(2026, 2, 4),
        &bandung_locations(),
        Some(17),
    ));
    let mut filter = FilterState::select_all(&dataset).unwrap();
    filter.weekdays = [DayOfWeek::Tuesday].into_iter().collect();
    let view = render(&dataset, &filter, &DisplayConfig::default());

    let dir = temp_path("exports");
    let path = write_export(&dir, date(2026, 10, 16), &view.filtered).unwrap();
    assert!(path.ends_with("traffic_congestion_20261016.csv"));

    let reloaded = load_dataset(path.to_str().unwrap()).unwrap();
    let expected: Vec<_> = view.filtered.iter().map(|o| (*o).clone()).collect();
    assert_eq!(reloaded.observations(), &expected[..]);
    assert_eq!(export_csv(&view.filtered).unwrap(), fs::read_to_string(&path).unwrap());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn unloadable_artifact_stops_before_any_view() {
    let missing = load_dataset(&temp_path("missing.csv"));
    assert!(matches!(missing, Err(LoadError::Io { .. })));

    let path = temp_path("garbage.csv");
    fs::write(&path, "not,a,dataset\n1,2,3\n").unwrap();
    assert!(matches!(load_dataset(&path), Err(LoadError::Csv { .. })));
    fs::remove_file(&path).ok();
}

#[test]
fn empty_selection_is_not_fatal() {
    let dataset = bandung_congestion::storage::Dataset::new(generate_with_seed(
        date(2026, 2, 2),
        date(2026, 2, 3),
        &bandung_locations(),
        Some(1),
    ));
    let mut filter = FilterState::select_all(&dataset).unwrap();
    filter.weekdays.clear();
    let view = render(&dataset, &filter, &DisplayConfig::default());
    assert_eq!(view.selection, Selection::Empty);
    assert!(view.rush_hours.is_empty());
    assert!(view.hour_weekday.is_empty());
    let json = to_json(&view).unwrap();
    assert!(json.contains("\"value\": null"));
}
