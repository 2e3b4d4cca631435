// aggregations.rs
//
// Descriptive statistics over filtered rows. Every mean is `None` over an empty
// group so empty selections never produce NaN.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::global_variables::{MARKER_SIZE_FACTOR, RUSH_HOUR_TOP_N};
use crate::shared_data::{CongestionStatus, DayOfWeek, HourOfDay, TrafficObservation};

/// Running sums for one group of rows.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    count: usize,
    congestion: f64,
    speed: f64,
    volume: f64,
    travel_time_index: f64,
}

impl Accumulator {
    fn add(&mut self, obs: &TrafficObservation) {
        self.count += 1;
        self.congestion += obs.congestion_level as f64;
        self.speed += obs.average_speed_kmh;
        self.volume += obs.vehicle_volume_per_hour as f64;
        self.travel_time_index += obs.travel_time_index;
    }

    fn mean(&self, sum: f64) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(sum / self.count as f64)
        }
    }

    fn mean_congestion(&self) -> Option<f64> {
        self.mean(self.congestion)
    }

    fn mean_speed(&self) -> Option<f64> {
        self.mean(self.speed)
    }

    fn mean_volume(&self) -> Option<f64> {
        self.mean(self.volume)
    }

    fn mean_travel_time_index(&self) -> Option<f64> {
        self.mean(self.travel_time_index)
    }
}

fn accumulate(rows: &[&TrafficObservation]) -> Accumulator {
    let mut acc = Accumulator::default();
    for obs in rows {
        acc.add(obs);
    }
    acc
}

fn group_by<K: Ord, F>(rows: &[&TrafficObservation], key: F) -> BTreeMap<K, Accumulator>
where
    F: Fn(&TrafficObservation) -> K,
{
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for obs in rows {
        groups.entry(key(obs)).or_default().add(obs);
    }
    groups
}

/// A metric over the filtered rows and its difference to the whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricComparison {
    pub value: Option<f64>,
    pub delta: Option<f64>,
}

impl MetricComparison {
    fn new(value: Option<f64>, baseline: Option<f64>) -> Self {
        let delta = match (value, baseline) {
            (Some(v), Some(b)) => Some(v - b),
            _ => None,
        };
        Self { value, delta }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub mean_speed: MetricComparison,
    pub mean_congestion: MetricComparison,
    pub mean_volume: MetricComparison,
    pub mean_travel_time_index: MetricComparison,
}

/// Headline means for `filtered`, each paired with its delta against `baseline`.
pub fn summary_metrics(
    filtered: &[&TrafficObservation],
    baseline: &[&TrafficObservation],
) -> SummaryMetrics {
    let current = accumulate(filtered);
    let base = accumulate(baseline);
    SummaryMetrics {
        mean_speed: MetricComparison::new(current.mean_speed(), base.mean_speed()),
        mean_congestion: MetricComparison::new(current.mean_congestion(), base.mean_congestion()),
        mean_volume: MetricComparison::new(current.mean_volume(), base.mean_volume()),
        mean_travel_time_index: MetricComparison::new(
            current.mean_travel_time_index(),
            base.mean_travel_time_index(),
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub mean_congestion: f64,
    pub mean_speed: f64,
}

/// Mean congestion and speed per date, chronological.
pub fn daily_trend(rows: &[&TrafficObservation]) -> Vec<DailyTrend> {
    group_by(rows, |o| o.date)
        .into_iter()
        .filter_map(|(date, acc)| {
            Some(DailyTrend {
                date,
                mean_congestion: acc.mean_congestion()?,
                mean_speed: acc.mean_speed()?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekdayCongestion {
    pub weekday: DayOfWeek,
    pub mean_congestion: f64,
}

/// Mean congestion per weekday in Monday..Sunday order, regardless of row order.
pub fn weekday_congestion(rows: &[&TrafficObservation]) -> Vec<WeekdayCongestion> {
    group_by(rows, |o| o.weekday)
        .into_iter()
        .filter_map(|(weekday, acc)| {
            Some(WeekdayCongestion {
                weekday,
                mean_congestion: acc.mean_congestion()?,
            })
        })
        .collect()
}

/// Hour x weekday pivot of mean congestion. Columns are the weekdays present,
/// Monday first; a cell is `None` when that pair has no rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CongestionMatrix {
    pub hours: Vec<HourOfDay>,
    pub weekdays: Vec<DayOfWeek>,
    /// `cells[row][col]` for `hours[row]` and `weekdays[col]`.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CongestionMatrix {
    pub fn get(&self, hour: HourOfDay, weekday: DayOfWeek) -> Option<f64> {
        let row = self.hours.iter().position(|h| *h == hour)?;
        let col = self.weekdays.iter().position(|d| *d == weekday)?;
        self.cells[row][col]
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

pub fn hour_weekday_matrix(rows: &[&TrafficObservation]) -> CongestionMatrix {
    let groups = group_by(rows, |o| (o.hour, o.weekday));
    let hours: Vec<HourOfDay> = rows
        .iter()
        .map(|o| o.hour)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let weekdays: Vec<DayOfWeek> = rows
        .iter()
        .map(|o| o.weekday)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = hours
        .iter()
        .map(|hour| {
            weekdays
                .iter()
                .map(|day| groups.get(&(*hour, *day)).and_then(|acc| acc.mean_congestion()))
                .collect()
        })
        .collect();

    CongestionMatrix {
        hours,
        weekdays,
        cells,
    }
}

/// Most frequent status; ties go to the lexicographically smallest label.
pub fn status_mode<'a, I>(statuses: I) -> Option<CongestionStatus>
where
    I: IntoIterator<Item = &'a CongestionStatus>,
{
    status_distribution(statuses).first().map(|(status, _)| *status)
}

/// Status frequencies, most frequent first, ties by label.
pub fn status_distribution<'a, I>(statuses: I) -> Vec<(CongestionStatus, usize)>
where
    I: IntoIterator<Item = &'a CongestionStatus>,
{
    let mut counts: BTreeMap<CongestionStatus, usize> = BTreeMap::new();
    for status in statuses {
        *counts.entry(*status).or_insert(0) += 1;
    }
    let mut distribution: Vec<_> = counts.into_iter().collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));
    distribution
}

/// Per-location map entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationStats {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mean_congestion: f64,
    pub mean_speed: f64,
    pub mean_volume: f64,
    pub dominant_status: CongestionStatus,
    /// Marker scale for the map, `mean_congestion * 5`.
    pub marker_size: f64,
}

/// Grouped by (location, latitude, longitude), ordered by location name.
pub fn location_stats(rows: &[&TrafficObservation]) -> Vec<LocationStats> {
    let mut groups: BTreeMap<(String, u64, u64), (Accumulator, Vec<CongestionStatus>)> =
        BTreeMap::new();
    for obs in rows {
        let key = (
            obs.location.clone(),
            obs.latitude.to_bits(),
            obs.longitude.to_bits(),
        );
        let (acc, statuses) = groups.entry(key).or_default();
        acc.add(obs);
        statuses.push(obs.status);
    }

    groups
        .into_iter()
        .filter_map(|((location, lat_bits, lon_bits), (acc, statuses))| {
            let mean_congestion = acc.mean_congestion()?;
            Some(LocationStats {
                location,
                latitude: f64::from_bits(lat_bits),
                longitude: f64::from_bits(lon_bits),
                mean_congestion,
                mean_speed: acc.mean_speed()?,
                mean_volume: acc.mean_volume()?,
                dominant_status: status_mode(&statuses)?,
                marker_size: mean_congestion * MARKER_SIZE_FACTOR,
            })
        })
        .collect()
}

/// Location statistics ranked by mean congestion, worst first.
pub fn rank_locations(stats: &[LocationStats]) -> Vec<LocationStats> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| b.mean_congestion.total_cmp(&a.mean_congestion));
    ranked
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyValue {
    pub hour: HourOfDay,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetail {
    pub location: String,
    pub hourly_speed: Vec<HourlyValue>,
    pub hourly_volume: Vec<HourlyValue>,
    pub status_distribution: Vec<(CongestionStatus, usize)>,
}

/// Hourly speed/volume profile and status mix for one location's rows.
pub fn location_detail(rows: &[&TrafficObservation], location: &str) -> LocationDetail {
    let own: Vec<&TrafficObservation> = rows
        .iter()
        .copied()
        .filter(|o| o.location == location)
        .collect();
    let hourly = group_by(&own, |o| o.hour);

    LocationDetail {
        location: location.to_string(),
        hourly_speed: hourly
            .iter()
            .filter_map(|(hour, acc)| Some(HourlyValue { hour: *hour, value: acc.mean_speed()? }))
            .collect(),
        hourly_volume: hourly
            .iter()
            .filter_map(|(hour, acc)| Some(HourlyValue { hour: *hour, value: acc.mean_volume()? }))
            .collect(),
        status_distribution: status_distribution(own.iter().map(|o| &o.status)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyProfile {
    pub hour: HourOfDay,
    pub mean_congestion: f64,
    pub mean_speed: f64,
    pub mean_volume: f64,
}

/// Per-hour means sorted by mean congestion, busiest first.
/// Equal congestion keeps hour order.
pub fn rush_hours(rows: &[&TrafficObservation]) -> Vec<HourlyProfile> {
    let mut profiles: Vec<HourlyProfile> = group_by(rows, |o| o.hour)
        .into_iter()
        .filter_map(|(hour, acc)| {
            Some(HourlyProfile {
                hour,
                mean_congestion: acc.mean_congestion()?,
                mean_speed: acc.mean_speed()?,
                mean_volume: acc.mean_volume()?,
            })
        })
        .collect();
    rank_hourly_profiles(&mut profiles);
    profiles
}

pub fn rank_hourly_profiles(profiles: &mut [HourlyProfile]) {
    profiles.sort_by(|a, b| b.mean_congestion.total_cmp(&a.mean_congestion));
}

pub fn top_rush_hours(ranked: &[HourlyProfile]) -> Vec<HourlyProfile> {
    ranked.iter().take(RUSH_HOUR_TOP_N).copied().collect()
}

/// Per-hour mean congestion split by weekend and weekday rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayTypeComparison {
    pub weekday: Vec<HourlyValue>,
    pub weekend: Vec<HourlyValue>,
}

pub fn weekday_vs_weekend(rows: &[&TrafficObservation]) -> DayTypeComparison {
    let groups = group_by(rows, |o| (o.weekday.is_weekend(), o.hour));
    let mut comparison = DayTypeComparison {
        weekday: Vec::new(),
        weekend: Vec::new(),
    };
    for ((is_weekend, hour), acc) in groups {
        let Some(value) = acc.mean_congestion() else {
            continue;
        };
        let series = if is_weekend {
            &mut comparison.weekend
        } else {
            &mut comparison.weekday
        };
        series.push(HourlyValue { hour, value });
    }
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_data::RoadType;

    fn obs(
        date: (i32, u32, u32),
        hour: u8,
        location: &str,
        congestion: u8,
        speed: f64,
        volume: u32,
    ) -> TrafficObservation {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        TrafficObservation {
            date,
            weekday: DayOfWeek::from(chrono::Datelike::weekday(&date)),
            hour: HourOfDay(hour),
            location: location.to_string(),
            latitude: -6.9,
            longitude: 107.6,
            road_type: RoadType::MainRoad,
            average_speed_kmh: speed,
            vehicle_volume_per_hour: volume,
            congestion_level: congestion,
            travel_time_index: 30.0 / speed,
            status: CongestionStatus::from_level(congestion),
        }
    }

    // 2026-02-02 is a Monday, 2026-02-07 a Saturday.
    fn five_levels() -> Vec<TrafficObservation> {
        vec![
            obs((2026, 2, 2), 8, "Jalan Dago", 2, 20.0, 600),
            obs((2026, 2, 2), 9, "Jalan Dago", 4, 18.0, 1200),
            obs((2026, 2, 3), 8, "Jalan Riau", 6, 12.0, 1800),
            obs((2026, 2, 7), 17, "Jalan Riau", 8, 9.0, 2400),
            obs((2026, 2, 8), 17, "Jalan Dago", 10, 6.0, 3000),
        ]
    }

    #[test]
    fn five_levels_average_to_six() {
        let data = five_levels();
        let rows: Vec<_> = data.iter().collect();
        let metrics = summary_metrics(&rows, &rows);
        assert_eq!(metrics.mean_congestion.value, Some(6.0));
        assert_eq!(metrics.mean_congestion.delta, Some(0.0));

        let distribution = status_distribution(data.iter().map(|o| &o.status));
        assert_eq!(distribution.len(), 5);
        assert!(distribution.iter().all(|(_, n)| *n == 1));
    }

    #[test]
    fn deltas_compare_against_the_baseline() {
        let data = five_levels();
        let all: Vec<_> = data.iter().collect();
        let heavy: Vec<_> = data.iter().filter(|o| o.congestion_level >= 8).collect();
        let metrics = summary_metrics(&heavy, &all);
        assert_eq!(metrics.mean_congestion.value, Some(9.0));
        assert_eq!(metrics.mean_congestion.delta, Some(3.0));
        assert_eq!(metrics.mean_volume.value, Some(2700.0));
        assert_eq!(metrics.mean_volume.delta, Some(900.0));
    }

    #[test]
    fn empty_selection_degrades_to_none() {
        let data = five_levels();
        let all: Vec<_> = data.iter().collect();
        let metrics = summary_metrics(&[], &all);
        assert_eq!(metrics.mean_speed.value, None);
        assert_eq!(metrics.mean_speed.delta, None);
        assert!(daily_trend(&[]).is_empty());
        assert!(hour_weekday_matrix(&[]).is_empty());
        assert!(location_stats(&[]).is_empty());
        assert!(rush_hours(&[]).is_empty());
        assert_eq!(status_mode(std::iter::empty::<&CongestionStatus>()), None);
    }

    #[test]
    fn daily_trend_is_chronological() {
        let mut data = five_levels();
        data.reverse();
        let rows: Vec<_> = data.iter().collect();
        let trend = daily_trend(&rows);
        let dates: Vec<_> = trend.iter().map(|t| t.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-02-02", "2026-02-03", "2026-02-07", "2026-02-08"]);
        assert_eq!(trend[0].mean_congestion, 3.0);
        assert_eq!(trend[0].mean_speed, 19.0);
    }

    #[test]
    fn weekdays_keep_monday_to_sunday_order() {
        let mut data = five_levels();
        data.reverse();
        let rows: Vec<_> = data.iter().collect();
        let days: Vec<_> = weekday_congestion(&rows).iter().map(|w| w.weekday).collect();
        assert_eq!(
            days,
            vec![DayOfWeek::Monday, DayOfWeek::Tuesday, DayOfWeek::Saturday, DayOfWeek::Sunday]
        );
    }

    #[test]
    fn matrix_has_present_weekdays_only() {
        let data = five_levels();
        let rows: Vec<_> = data.iter().collect();
        let matrix = hour_weekday_matrix(&rows);
        assert_eq!(matrix.hours, vec![HourOfDay(8), HourOfDay(9), HourOfDay(17)]);
        assert_eq!(
            matrix.weekdays,
            vec![DayOfWeek::Monday, DayOfWeek::Tuesday, DayOfWeek::Saturday, DayOfWeek::Sunday]
        );
        assert_eq!(matrix.get(HourOfDay(8), DayOfWeek::Monday), Some(2.0));
        assert_eq!(matrix.get(HourOfDay(17), DayOfWeek::Sunday), Some(10.0));
        assert_eq!(matrix.get(HourOfDay(9), DayOfWeek::Saturday), None);
    }

    #[test]
    fn location_stats_carry_mode_and_marker_size() {
        let data = five_levels();
        let rows: Vec<_> = data.iter().collect();
        let stats = location_stats(&rows);
        assert_eq!(stats.len(), 2);
        let dago = &stats[0];
        assert_eq!(dago.location, "Jalan Dago");
        assert!((dago.mean_congestion - 16.0 / 3.0).abs() < 1e-9);
        assert!((dago.marker_size - dago.mean_congestion * 5.0).abs() < 1e-9);
        // Free, Very Congested and Very Free each once: "Free" sorts first.
        assert_eq!(dago.dominant_status, CongestionStatus::Free);

        let ranked = rank_locations(&stats);
        assert_eq!(ranked[0].location, "Jalan Riau");
    }

    #[test]
    fn status_mode_prefers_frequency_then_label() {
        use CongestionStatus::*;
        assert_eq!(status_mode(&[Moderate, Congested, Congested]), Some(Congested));
        assert_eq!(status_mode(&[VeryFree, Moderate]), Some(Moderate));
        assert_eq!(status_mode(&[VeryCongested, Congested]), Some(Congested));
    }

    #[test]
    fn location_detail_is_restricted_to_one_location() {
        let data = five_levels();
        let rows: Vec<_> = data.iter().collect();
        let detail = location_detail(&rows, "Jalan Riau");
        assert_eq!(detail.hourly_speed.len(), 2);
        assert_eq!(detail.hourly_speed[0], HourlyValue { hour: HourOfDay(8), value: 12.0 });
        assert_eq!(detail.hourly_volume[1], HourlyValue { hour: HourOfDay(17), value: 2400.0 });
        let total: usize = detail.status_distribution.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 2);

        let unknown = location_detail(&rows, "Jalan Braga");
        assert!(unknown.hourly_speed.is_empty());
        assert!(unknown.status_distribution.is_empty());
    }

    #[test]
    fn rush_hours_rank_by_congestion() {
        let mut profiles = vec![
            HourlyProfile { hour: HourOfDay(8), mean_congestion: 8.5, mean_speed: 10.0, mean_volume: 2500.0 },
            HourlyProfile { hour: HourOfDay(12), mean_congestion: 6.0, mean_speed: 15.0, mean_volume: 1800.0 },
            HourlyProfile { hour: HourOfDay(17), mean_congestion: 9.2, mean_speed: 8.0, mean_volume: 2700.0 },
        ];
        rank_hourly_profiles(&mut profiles);
        let order: Vec<u8> = profiles.iter().map(|p| p.hour.0).collect();
        assert_eq!(order, vec![17, 8, 12]);
    }

    #[test]
    fn top_five_of_ranked_hours() {
        let data = five_levels();
        let rows: Vec<_> = data.iter().collect();
        let ranked = rush_hours(&rows);
        assert_eq!(ranked[0].hour, HourOfDay(17));
        assert_eq!(ranked[0].mean_congestion, 9.0);
        assert_eq!(top_rush_hours(&ranked).len(), 3);
    }

    #[test]
    fn weekend_rows_split_from_weekday_rows() {
        let data = five_levels();
        let rows: Vec<_> = data.iter().collect();
        let comparison = weekday_vs_weekend(&rows);
        assert_eq!(
            comparison.weekend,
            vec![HourlyValue { hour: HourOfDay(17), value: 9.0 }]
        );
        assert_eq!(comparison.weekday.len(), 2);
        assert_eq!(comparison.weekday[0], HourlyValue { hour: HourOfDay(8), value: 4.0 });
    }
}
