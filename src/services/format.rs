//! Display formatting shared by dashboard cards, tables and charts.

use crate::models::units::{FEET_PER_METER, MILES_PER_METER};
use crate::models::UnitSystem;

/// Below this many miles, imperial distances are shown in feet.
const MIN_MILES_DISPLAY: f64 = 0.1;

/// Format a distance given in meters.
///
/// Metric: `"850 m"` below one kilometer, `"12.34 km"` otherwise.
/// Imperial: `"3.21 mi"` from 0.1 mi up, `"420 ft"` below.
pub fn format_distance(meters: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => {
            if meters >= 1000.0 {
                format!("{:.2} km", meters / 1000.0)
            } else {
                format!("{:.0} m", meters)
            }
        }
        UnitSystem::Imperial => {
            let miles = meters * MILES_PER_METER;
            if miles >= MIN_MILES_DISPLAY {
                format!("{:.2} mi", miles)
            } else {
                format!("{:.0} ft", meters * FEET_PER_METER)
            }
        }
    }
}

/// Format a duration as `HH:MM:SS`. Hours keep counting past 24.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format an elevation given in meters, with no decimals.
pub fn format_elevation(meters: f64, units: UnitSystem) -> String {
    match units {
        UnitSystem::Metric => format!("{:.0} m", meters),
        UnitSystem::Imperial => format!("{:.0} ft", meters * FEET_PER_METER),
    }
}

/// Total time as fractional hours, e.g. `"12.5 hrs"`.
pub fn format_hours(seconds: u64) -> String {
    format!("{:.1} hrs", seconds as f64 / 3600.0)
}

/// Calories with thousands separators, e.g. `"12,345 kcal"`.
pub fn format_calories(kcal: f64) -> String {
    format!("{} kcal", group_thousands(kcal.round() as i64))
}

pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Distance in the unit the chart axis uses: meters, or feet for imperial.
pub fn chart_distance(meters: f64, units: UnitSystem) -> f64 {
    match units {
        UnitSystem::Metric => meters,
        UnitSystem::Imperial => meters * FEET_PER_METER,
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
