use crate::{model::Forecast, state::TemperatureUnit};

use super::WeatherIcon;

/// Entries shown in the hourly view.
pub const MAX_HOURLY_ENTRIES: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct HourlySummary {
    /// Local "HH:MM".
    pub time: String,
    pub temperature: i64,
    pub icon: WeatherIcon,
    pub description: String,
}

pub fn hourly_forecast(forecast: &Forecast, unit: TemperatureUnit) -> Vec<HourlySummary> {
    let offset = forecast.city.utc_offset();
    forecast
        .list
        .iter()
        .take(MAX_HOURLY_ENTRIES)
        .map(|entry| HourlySummary {
            time: entry.local_time(offset).format("%H:%M").to_string(),
            temperature: unit.display(entry.main.temp),
            icon: WeatherIcon::classify(entry.condition_group()),
            description: entry.description().to_string(),
        })
        .collect()
}
