use serde::{Deserialize, Serialize};

pub const MILES_PER_KM: f64 = 0.621371;
pub const FEET_PER_METER: f64 = 3.28084;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Some(UnitSystem::Metric),
            "imperial" => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn distance_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "mi",
        }
    }

    pub fn elevation_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }
}

pub fn to_display_distance(km: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => km,
        UnitSystem::Imperial => km * MILES_PER_KM,
    }
}

pub fn to_display_elevation(m: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => m,
        UnitSystem::Imperial => m * FEET_PER_METER,
    }
}

pub fn from_display_distance(value: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value / MILES_PER_KM,
    }
}

pub fn from_display_elevation(value: f64, unit: UnitSystem) -> f64 {
    match unit {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value / FEET_PER_METER,
    }
}

/// Distances are shown with two decimals everywhere (chart, summary, CSV).
pub fn round_distance(value: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0 so it never prints as "-0.00".
    (value * 100.0).round() / 100.0 + 0.0
}

pub fn round_elevation(value: f64) -> f64 {
    value.round() + 0.0
}

/// Converted and rounded distance, ready for display.
pub fn display_distance(km: f64, unit: UnitSystem) -> f64 {
    round_distance(to_display_distance(km, unit))
}

pub fn display_elevation(m: f64, unit: UnitSystem) -> f64 {
    round_elevation(to_display_elevation(m, unit))
}

pub fn format_distance(km: f64, unit: UnitSystem) -> String {
    format!("{:.2}", display_distance(km, unit))
}

pub fn format_elevation(m: f64, unit: UnitSystem) -> String {
    format!("{:.0}", display_elevation(m, unit))
}
