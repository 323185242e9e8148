//! Display-ready computations over a forecast payload.

pub mod current;
pub mod daily;
pub mod hourly;

pub use current::{CurrentConditions, Stat};
pub use daily::{DailySummary, group_by_day};
pub use hourly::{HourlySummary, hourly_forecast};

/// Icon family for a free-text weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
    PartlyCloudy,
}

impl WeatherIcon {
    /// First keyword hit wins, checked in a fixed order; case-insensitive.
    pub fn classify(condition: &str) -> Self {
        let condition = condition.to_lowercase();
        if condition.contains("clear") {
            WeatherIcon::Sunny
        } else if condition.contains("cloud") {
            WeatherIcon::Cloudy
        } else if condition.contains("rain") || condition.contains("drizzle") {
            WeatherIcon::Rainy
        } else if condition.contains("snow") {
            WeatherIcon::Snowy
        } else if condition.contains("wind") {
            WeatherIcon::Windy
        } else {
            WeatherIcon::PartlyCloudy
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "weather-sunny",
            WeatherIcon::Cloudy => "weather-cloudy",
            WeatherIcon::Rainy => "weather-rainy",
            WeatherIcon::Snowy => "weather-snowy",
            WeatherIcon::Windy => "weather-windy",
            WeatherIcon::PartlyCloudy => "weather-partly-cloudy",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "☀",
            WeatherIcon::Cloudy => "☁",
            WeatherIcon::Rainy => "☂",
            WeatherIcon::Snowy => "❄",
            WeatherIcon::Windy => "≋",
            WeatherIcon::PartlyCloudy => "⛅",
        }
    }
}
