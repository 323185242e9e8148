//! Plain-text rendering of the city screens.

use std::fmt::Write;

use weatherly_core::{
    AppState, Screen,
    view::{CurrentConditions, WeatherIcon, group_by_day, hourly_forecast},
};

/// Render `which` for the forecast held in `state`.
///
/// Errors replace the content inline; nothing is retried.
pub fn screen(state: &AppState, label: &str, which: Screen) -> String {
    let unit = state.unit.temperature_unit;
    let forecast = &state.forecast;

    if forecast.is_loading() {
        return "Loading weather data...".to_string();
    }
    if let Some(error) = &forecast.error {
        return format!("Error: {error}");
    }
    let Some(data) = &forecast.data else {
        return "No weather data available.".to_string();
    };

    let mut out = String::new();
    match which {
        Screen::Current => {
            let Some(panel) = CurrentConditions::from_forecast(data, unit) else {
                return "No weather data available.".to_string();
            };
            let _ = writeln!(out, "{} {}  ({label})", panel.icon.glyph(), panel.location);
            for stat in &panel.stats {
                let _ = writeln!(out, "  {:<12} {}", stat.label, stat.value);
            }
        }
        Screen::Daily => {
            let days = group_by_day(&data.list, data.city.timezone);
            if days.is_empty() {
                return "No 5-Day forecast data available".to_string();
            }
            let _ = writeln!(out, "5-Day Weather Forecast: {label}");
            for day in days {
                let icon = WeatherIcon::classify(&day.condition);
                let _ = writeln!(
                    out,
                    "  {:<4} {} {:>4}{}  {}",
                    day.day,
                    icon.glyph(),
                    unit.display(day.avg_temp),
                    unit.symbol(),
                    day.condition
                );
            }
        }
        Screen::Hourly => {
            let rows = hourly_forecast(data, unit);
            if rows.is_empty() {
                return "No hourly forecast available".to_string();
            }
            let _ = writeln!(out, "24-Hour Weather Forecast: {label}");
            for row in rows {
                let _ = writeln!(
                    out,
                    "  {} {} {:>4}{}  {}",
                    row.time,
                    row.icon.glyph(),
                    row.temperature,
                    unit.symbol(),
                    row.description
                );
            }
        }
    }
    out
}

/// Message to show instead of the suggestion list, if any.
pub fn search_status(state: &AppState) -> Option<String> {
    let search = &state.search;
    if let Some(error) = &search.error {
        return Some(format!("Error: {error}"));
    }
    if search.suggestions.is_empty() {
        return Some(format!("No suggestions for '{}'.", search.query));
    }
    None
}
