use chrono::DateTime;

use crate::{model::Forecast, state::TemperatureUnit};

use super::WeatherIcon;

/// Assumed visibility when the payload omits it, in metres.
const DEFAULT_VISIBILITY_M: u32 = 10_000;

/// One labelled value on the current-conditions panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

/// The "today" panel, built from the nearest forecast entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location: String,
    pub icon: WeatherIcon,
    pub stats: Vec<Stat>,
}

impl CurrentConditions {
    /// `None` when the forecast has no entries.
    pub fn from_forecast(forecast: &Forecast, unit: TemperatureUnit) -> Option<Self> {
        let entry = forecast.list.first()?;
        let city = &forecast.city;
        let offset = city.utc_offset();

        let local_clock = |epoch: i64| {
            DateTime::from_timestamp(epoch, 0)
                .map(|t| t.with_timezone(&offset).format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        let temperature = |celsius: f64| format!("{}{}", unit.display_precise(celsius), unit.symbol());
        let visibility_km = f64::from(entry.visibility.unwrap_or(DEFAULT_VISIBILITY_M)) / 1000.0;

        let stats = vec![
            stat("Temperature", temperature(entry.main.temp)),
            stat("Feels Like", temperature(entry.main.feels_like)),
            stat("Condition", entry.description().to_string()),
            stat("Visibility", format!("{visibility_km:.1} km")),
            stat("Cloudiness", format!("{}%", entry.clouds.all)),
            stat("Sunrise", local_clock(city.sunrise)),
            stat("Sunset", local_clock(city.sunset)),
            stat("Pressure", format!("{} hPa", entry.main.pressure)),
            stat("Wind", format!("{} m/s", entry.wind.speed)),
            stat("Humidity", format!("{}%", entry.main.humidity)),
        ];

        Some(Self {
            location: city.label(),
            icon: WeatherIcon::classify(entry.description()),
            stats,
        })
    }

    pub fn stat(&self, label: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.value.as_str())
    }
}

fn stat(label: &'static str, value: String) -> Stat {
    Stat { label, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, Clouds, Condition, Coordinates, ForecastEntry, Readings, Wind};

    fn london() -> Forecast {
        Forecast {
            city: City {
                name: "London".into(),
                country: "GB".into(),
                coord: Coordinates::new(51.5, -0.12),
                // 07:30:00 and 16:15:00 UTC on 2024-01-01
                sunrise: 1_704_094_200,
                sunset: 1_704_125_700,
                timezone: 0,
                population: None,
            },
            list: vec![ForecastEntry {
                dt: 1_704_103_200,
                main: Readings {
                    temp: 15.0,
                    feels_like: 13.55,
                    pressure: 1012.0,
                    humidity: 81,
                },
                weather: vec![Condition {
                    main: "Clouds".into(),
                    description: "scattered clouds".into(),
                }],
                wind: Wind { speed: 4.6 },
                clouds: Clouds { all: 40 },
                visibility: None,
                dt_txt: None,
            }],
        }
    }

    #[test]
    fn panel_in_fahrenheit() {
        let panel = CurrentConditions::from_forecast(&london(), TemperatureUnit::Fahrenheit)
            .expect("forecast has entries");

        assert_eq!(panel.location, "London, GB");
        assert_eq!(panel.icon, WeatherIcon::Cloudy);
        assert_eq!(panel.stat("Temperature"), Some("59.0°F"));
        assert_eq!(panel.stat("Visibility"), Some("10.0 km"));
        assert_eq!(panel.stat("Cloudiness"), Some("40%"));
        assert_eq!(panel.stat("Sunrise"), Some("07:30:00"));
        assert_eq!(panel.stat("Sunset"), Some("16:15:00"));
        assert_eq!(panel.stat("Pressure"), Some("1012 hPa"));
        assert_eq!(panel.stat("Wind"), Some("4.6 m/s"));
        assert_eq!(panel.stat("Humidity"), Some("81%"));
    }

    #[test]
    fn empty_forecast_has_no_panel() {
        let mut forecast = london();
        forecast.list.clear();
        assert!(CurrentConditions::from_forecast(&forecast, TemperatureUnit::Celsius).is_none());
    }
}
