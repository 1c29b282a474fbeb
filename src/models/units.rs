//! Unit systems and dashboard selectors.

use serde::{de, Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Meters to feet.
pub const FEET_PER_METER: f64 = 3.28084;
/// Meters to statute miles.
pub const MILES_PER_METER: f64 = 0.000621371;

/// Unit system used for display.
///
/// Parsing ignores case, so `metric`, `Metric` and `METRIC` are all accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl<'de> Deserialize<'de> for UnitSystem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.to_ascii_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(de::Error::unknown_variant(&raw, &["metric", "imperial"])),
        }
    }
}

/// Value plotted on the dashboard's time-series chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ChartMetric {
    #[default]
    Distance,
    HybridScore,
}

/// Field used to rank activities in record and leaderboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RecordMetric {
    MovingTime,
    Distance,
    Elevation,
    #[default]
    HybridScore,
}
