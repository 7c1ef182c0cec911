//! Weather data models
//!
//! Records are static per location. Text fields hold catalog keys; the sky
//! condition is a [`ConditionKind`] and only becomes an icon at the
//! rendering boundary.

use serde::{Deserialize, Serialize};

use crate::types::{GeoCoordinates, Location};

/// Sky condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ConditionKind {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rain,
}

impl ConditionKind {
    pub fn label_key(&self) -> &'static str {
        match self {
            ConditionKind::Sunny => "weather.conditions.sunny",
            ConditionKind::PartlyCloudy => "weather.conditions.partlyCloudy",
            ConditionKind::Cloudy => "weather.conditions.cloudy",
            ConditionKind::Rain => "weather.conditions.rain",
        }
    }
}

/// Current conditions at a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub city_key: String,
    pub temperature_celsius: i32,
    pub condition: ConditionKind,
    pub humidity_percent: i32,
    pub wind_kmh: i32,
}

/// One day of the weekly forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    pub day_key: String,
    pub temperature_celsius: i32,
    pub condition: ConditionKind,
}

/// Everything the weather widget shows for a location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub location: Location,
    pub coordinates: GeoCoordinates,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub advisory_key: String,
}

const DAY_KEYS: [&str; 7] = [
    "days.mon", "days.tue", "days.wed", "days.thu", "days.fri", "days.sat", "days.sun",
];

fn week(days: [(i32, ConditionKind); 7]) -> Vec<DailyForecast> {
    DAY_KEYS
        .iter()
        .zip(days)
        .map(|(day, (temperature, condition))| DailyForecast {
            day_key: day.to_string(),
            temperature_celsius: temperature,
            condition,
        })
        .collect()
}

/// Static weather record for `location`
pub fn weather_report(location: Location) -> WeatherReport {
    use ConditionKind::*;

    let (current, forecast, advisory) = match location {
        Location::Delhi => (
            (32, Sunny, 40, 8),
            week([
                (33, Sunny),
                (34, Sunny),
                (32, PartlyCloudy),
                (30, PartlyCloudy),
                (33, Sunny),
                (35, Sunny),
                (34, PartlyCloudy),
            ]),
            "weather.advisories.delhi",
        ),
        Location::Mumbai => (
            (29, Rain, 85, 20),
            week([
                (28, Rain),
                (29, Rain),
                (29, Cloudy),
                (27, Rain),
                (28, Rain),
                (30, PartlyCloudy),
                (30, PartlyCloudy),
            ]),
            "weather.advisories.mumbai",
        ),
        Location::Bangalore => (
            (24, PartlyCloudy, 75, 15),
            week([
                (25, PartlyCloudy),
                (26, Cloudy),
                (24, Rain),
                (23, Rain),
                (25, PartlyCloudy),
                (26, Cloudy),
                (26, PartlyCloudy),
            ]),
            "weather.advisories.bangalore",
        ),
    };
    let (temperature, condition, humidity, wind) = current;

    WeatherReport {
        location,
        coordinates: location.coordinates(),
        current: CurrentConditions {
            city_key: location.city_key().to_string(),
            temperature_celsius: temperature,
            condition,
            humidity_percent: humidity,
            wind_kmh: wind,
        },
        forecast,
        advisory_key: advisory.to_string(),
    }
}
