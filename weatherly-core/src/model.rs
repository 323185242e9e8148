use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// One hit of a geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPlace {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub state: Option<String>,
}

impl GeoPlace {
    /// Display label used for suggestions, e.g. "Paris, FR".
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Forecast payload as returned by the 5 day / 3 hour forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub city: City,
    pub list: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub coord: Coordinates,
    /// Epoch seconds.
    pub sunrise: i64,
    /// Epoch seconds.
    pub sunset: i64,
    /// Shift in seconds from UTC.
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub population: Option<u64>,
}

impl City {
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }

    pub fn utc_offset(&self) -> FixedOffset {
        utc_offset(self.timezone)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Epoch seconds.
    pub dt: i64,
    pub main: Readings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    /// Metres.
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub dt_txt: Option<String>,
}

impl ForecastEntry {
    /// Free-text description of the first reported condition.
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("Unknown")
    }

    /// Condition group of the first reported condition ("Rain", "Clouds", ...).
    pub fn condition_group(&self) -> &str {
        self.weather
            .first()
            .map(|w| w.main.as_str())
            .unwrap_or("Unknown")
    }

    pub fn time_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.dt, 0).unwrap_or_default()
    }

    pub fn local_time(&self, offset: FixedOffset) -> DateTime<FixedOffset> {
        self.time_utc().with_timezone(&offset)
    }
}

/// Temperatures in Celsius, pressure in hPa, humidity in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

/// Metres per second.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

/// Offset for a shift in seconds; out-of-range values fall back to UTC.
pub fn utc_offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forecast_payload_with_missing_optionals() {
        let json = serde_json::json!({
            "city": {
                "name": "London",
                "country": "GB",
                "coord": {"lat": 51.5085, "lon": -0.1257},
                "sunrise": 1_700_000_000,
                "sunset": 1_700_030_000
            },
            "list": [{
                "dt": 1_700_010_800,
                "main": {"temp": 15.0, "feels_like": 14.2, "pressure": 1012, "humidity": 80},
                "weather": [{"main": "Clouds", "description": "broken clouds"}],
                "wind": {"speed": 4.1},
                "clouds": {"all": 75}
            }]
        });

        let forecast: Forecast = serde_json::from_value(json).expect("payload should parse");
        assert_eq!(forecast.city.label(), "London, GB");
        assert_eq!(forecast.city.timezone, 0);
        let entry = &forecast.list[0];
        assert_eq!(entry.description(), "broken clouds");
        assert_eq!(entry.condition_group(), "Clouds");
        assert_eq!(entry.visibility, None);
        assert_eq!(entry.clouds.all, 75);
    }

    #[test]
    fn entry_without_conditions_reports_unknown() {
        let json = serde_json::json!({"dt": 0, "main": {"temp": 1.0}});
        let entry: ForecastEntry = serde_json::from_value(json).expect("entry should parse");
        assert_eq!(entry.description(), "Unknown");
        assert_eq!(entry.wind.speed, 0.0);
    }

    #[test]
    fn geo_place_label() {
        let place = GeoPlace {
            name: "Paris".into(),
            country: "FR".into(),
            lat: 48.85,
            lon: 2.35,
            state: Some("Ile-de-France".into()),
        };
        assert_eq!(place.label(), "Paris, FR");
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        assert_eq!(utc_offset(3600).local_minus_utc(), 3600);
        assert_eq!(utc_offset(i32::MAX).local_minus_utc(), 0);
    }
}
