// console.rs
//
// Text rendering of the view model for the dashboard CLI.

use crate::analytics::aggregations::{HourlyValue, LocationDetail, SummaryMetrics};
use crate::analytics::{FilterState, ViewModel};
use crate::shared_data::{CongestionStatus, HourOfDay, TrafficObservation};

/// "12.3 (+0.4)" style cell; "-" when the selection is empty.
pub fn format_metric(value: Option<f64>, delta: Option<f64>, decimals: usize) -> String {
    match (value, delta) {
        (Some(v), Some(d)) => format!("{:.*} ({:+.*})", decimals, v, decimals, d),
        (Some(v), None) => format!("{:.*}", decimals, v),
        _ => "-".to_string(),
    }
}

pub fn print_filter(filter: &FilterState) {
    println!("Date range: {} to {}", filter.start_date, filter.end_date);
    println!(
        "Locations ({}): {}",
        filter.locations.len(),
        filter.locations.iter().cloned().collect::<Vec<_>>().join(", ")
    );
    println!(
        "Weekdays ({}): {}",
        filter.weekdays.len(),
        filter
            .weekdays
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

pub fn print_summary(summary: &SummaryMetrics) {
    println!("Summary Metrics (delta vs. full dataset):");
    println!(
        "  Mean speed:             {} km/h",
        format_metric(summary.mean_speed.value, summary.mean_speed.delta, 1)
    );
    println!(
        "  Mean congestion:        {} /10",
        format_metric(summary.mean_congestion.value, summary.mean_congestion.delta, 1)
    );
    println!(
        "  Mean volume:            {} /h",
        format_metric(summary.mean_volume.value, summary.mean_volume.delta, 0)
    );
    println!(
        "  Mean travel-time index: {}x",
        format_metric(
            summary.mean_travel_time_index.value,
            summary.mean_travel_time_index.delta,
            2
        )
    );
}

pub fn print_temporal(view: &ViewModel<'_>) {
    println!("Daily Trend:");
    println!("  {:<12} {:>10} {:>10}", "Date", "Congestion", "Speed");
    for day in &view.daily_trend {
        println!(
            "  {:<12} {:>10.2} {:>10.1}",
            day.date.to_string(),
            day.mean_congestion,
            day.mean_speed
        );
    }

    println!("\nMean Congestion per Weekday:");
    for day in &view.weekday_congestion {
        println!("  {:<10} {:.2}", day.weekday.name(), day.mean_congestion);
    }

    println!("\nHour x Weekday Congestion:");
    let matrix = &view.hour_weekday;
    print!("  {:<6}", "Hour");
    for day in &matrix.weekdays {
        print!(" {:>9}", &day.name()[..3]);
    }
    println!();
    for (row, hour) in matrix.hours.iter().enumerate() {
        print!("  {:<6}", hour.to_string());
        for cell in &matrix.cells[row] {
            match cell {
                Some(level) => print!(" {:>9.2}", level),
                None => print!(" {:>9}", "-"),
            }
        }
        println!();
    }
}

pub fn print_locations(view: &ViewModel<'_>) {
    println!("Location Statistics (worst first):");
    println!(
        "  {:<22} {:>10} {:>10} {:>10} {:<15} {:>6}",
        "Location", "Congestion", "Speed", "Volume", "Status", "Size"
    );
    for stats in &view.location_table {
        println!(
            "  {:<22} {:>10.1} {:>10.1} {:>10.0} {:<15} {:>6.1}",
            stats.location,
            stats.mean_congestion,
            stats.mean_speed,
            stats.mean_volume,
            stats.dominant_status.label(),
            stats.marker_size
        );
    }
}

pub fn print_location_detail(detail: &LocationDetail) {
    println!("Detail for {}:", detail.location);
    println!("  {:<6} {:>10} {:>10}", "Hour", "Speed", "Volume");
    for (speed, volume) in detail.hourly_speed.iter().zip(&detail.hourly_volume) {
        println!(
            "  {:<6} {:>10.1} {:>10.0}",
            speed.hour.to_string(),
            speed.value,
            volume.value
        );
    }
    println!("  Status distribution:");
    for status in CongestionStatus::ALL {
        let count = detail
            .status_distribution
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, count)| *count);
        println!("    {:<15} {}", status.label(), count);
    }
}

pub fn print_rush_hours(view: &ViewModel<'_>) {
    println!("Top {} Rush Hours:", view.top_rush_hours.len());
    for (rank, profile) in view.top_rush_hours.iter().enumerate() {
        println!(
            "  {}. {}  congestion {:.2}, speed {:.1} km/h, volume {:.0}/h",
            rank + 1,
            profile.hour,
            profile.mean_congestion,
            profile.mean_speed,
            profile.mean_volume
        );
    }

    println!("\nWeekday vs Weekend (mean congestion per hour):");
    let comparison = &view.day_type_comparison;
    println!("  {:<6} {:>8} {:>8}", "Hour", "Weekday", "Weekend");
    let mut hours: Vec<_> = comparison
        .weekday
        .iter()
        .chain(&comparison.weekend)
        .map(|v| v.hour)
        .collect();
    hours.sort();
    hours.dedup();
    let lookup = |series: &[HourlyValue], hour: HourOfDay| {
        series
            .iter()
            .find(|v| v.hour == hour)
            .map(|v| format!("{:.2}", v.value))
            .unwrap_or_else(|| "-".to_string())
    };
    for hour in hours {
        println!(
            "  {:<6} {:>8} {:>8}",
            hour.to_string(),
            lookup(comparison.weekday.as_slice(), hour),
            lookup(comparison.weekend.as_slice(), hour)
        );
    }
}

pub fn print_records(records: &[&TrafficObservation]) {
    println!(
        "  {:<10} {:<9} {:<5} {:<22} {:<16} {:>6} {:>6} {:>4} {:<15} {:>5}",
        "Date", "Day", "Hour", "Location", "Road", "Speed", "Volume", "Lvl", "Status", "TTI"
    );
    for obs in records {
        println!(
            "  {:<10} {:<9} {:<5} {:<22} {:<16} {:>6.1} {:>6} {:>4} {:<15} {:>5.2}",
            obs.date.to_string(),
            obs.weekday.name(),
            obs.hour.to_string(),
            obs.location,
            obs.road_type.to_string(),
            obs.average_speed_kmh,
            obs.vehicle_volume_per_hour,
            obs.congestion_level,
            obs.status.label(),
            obs.travel_time_index
        );
    }
    println!("  ({} rows)", records.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_cells() {
        assert_eq!(format_metric(Some(12.34), Some(0.5), 1), "12.3 (+0.5)");
        assert_eq!(format_metric(Some(1.5), Some(-0.25), 2), "1.50 (-0.25)");
        assert_eq!(format_metric(Some(2400.0), None, 0), "2400");
        assert_eq!(format_metric(None, None, 1), "-");
    }
}
