use std::fmt;

use serde::{Deserialize, Serialize};

/// Temperature unit preference. Stored readings are always Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    /// Exact conversion of a Celsius reading into this unit.
    pub fn convert(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Inverse of [`convert`](Self::convert).
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Whole-degree display value; halves round up (-2.5 -> -2).
    pub fn display(self, celsius: f64) -> i64 {
        round_half_up(self.convert(celsius))
    }

    /// One-decimal display value, e.g. "59.0".
    pub fn display_precise(self, celsius: f64) -> String {
        format!("{:.1}", self.convert(celsius))
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitState {
    pub temperature_unit: TemperatureUnit,
}

impl UnitState {
    pub fn new(temperature_unit: TemperatureUnit) -> Self {
        Self { temperature_unit }
    }

    pub fn toggle(&mut self) -> TemperatureUnit {
        self.temperature_unit = self.temperature_unit.toggled();
        self.temperature_unit
    }
}
