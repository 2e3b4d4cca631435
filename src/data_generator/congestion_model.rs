// congestion_model.rs
//
// Rules mapping time of day and day of week to congestion, speed, volume and
// travel-time index for a single observation.

use rand::Rng;

use crate::global_variables::{
    MAX_CONGESTION, MAX_SPEED_REDUCTION, MIN_SPEED_KMH, MIN_VOLUME, SPEED_JITTER,
    VOLUME_JITTER, VOLUME_PER_CONGESTION_LEVEL,
};
use crate::shared_data::DayOfWeek;

/// Inclusive congestion bucket for an hour of the day.
pub fn congestion_range(hour: u8, weekday: DayOfWeek) -> (u8, u8) {
    let weekend = weekday.is_weekend();
    match hour {
        // Morning rush
        6..=9 if weekend => (3, 5),
        6..=9 => (7, 10),
        // Working hours
        10..=16 if weekend => (4, 7),
        10..=16 => (5, 7),
        // Evening rush
        17..=20 if weekend => (5, 8),
        17..=20 => (8, 10),
        // Night
        _ if weekend => (4, 6),
        _ => (3, 5),
    }
}

/// Draw a congestion level (1-10) uniformly from the bucket of `hour`.
pub fn draw_congestion_level<R: Rng + ?Sized>(hour: u8, weekday: DayOfWeek, rng: &mut R) -> u8 {
    let (low, high) = congestion_range(hour, weekday);
    rng.random_range(low..=high)
}

/// Speed before jitter. Reduction is proportional to congestion, at most 70%.
pub fn congestion_adjusted_speed(base_speed: f64, congestion_level: u8) -> f64 {
    let reduction = (congestion_level.min(MAX_CONGESTION) as f64 / 10.0) * MAX_SPEED_REDUCTION;
    base_speed * (1.0 - reduction)
}

/// Average speed in km/h with +/-10% jitter, never below 5 km/h.
pub fn calculate_speed<R: Rng + ?Sized>(base_speed: f64, congestion_level: u8, rng: &mut R) -> f64 {
    let variation: f64 = rng.random_range(-SPEED_JITTER..=SPEED_JITTER);
    apply_speed_variation(base_speed, congestion_level, variation)
}

pub fn apply_speed_variation(base_speed: f64, congestion_level: u8, variation: f64) -> f64 {
    let speed = congestion_adjusted_speed(base_speed, congestion_level) * (1.0 + variation);
    speed.max(MIN_SPEED_KMH)
}

/// Vehicles per hour, never below 100.
pub fn calculate_volume<R: Rng + ?Sized>(congestion_level: u8, rng: &mut R) -> u32 {
    let variation = rng.random_range(-VOLUME_JITTER..=VOLUME_JITTER);
    let volume = congestion_level as i64 * VOLUME_PER_CONGESTION_LEVEL + variation;
    volume.max(MIN_VOLUME as i64) as u32
}

/// Free-flow time over actual time (1.0 = no delay).
pub fn travel_time_index(actual_speed: f64, base_speed: f64) -> f64 {
    base_speed / actual_speed
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
