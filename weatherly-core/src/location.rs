use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::model::Coordinates;

static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?,-?\d+(\.\d+)?$").expect("coordinate pattern is valid")
});

/// How a forecast lookup addresses its location.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name, matched by the upstream service.
    Name(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Interpret a forecast location string.
    ///
    /// Only a strict `"<lat>,<lon>"` pair of plain decimals is treated as
    /// coordinates (no spaces, no exponents); anything else is a place name.
    pub fn parse(input: &str) -> Self {
        if COORDINATE_PAIR.is_match(input) {
            if let Some((lat, lon)) = input.split_once(',') {
                if let (Ok(lat), Ok(lon)) = (lat.parse::<f64>(), lon.parse::<f64>()) {
                    return LocationQuery::Coordinates(Coordinates::new(lat, lon));
                }
            }
        }

        LocationQuery::Name(input.to_string())
    }

    pub fn is_coordinates(&self) -> bool {
        matches!(self, LocationQuery::Coordinates(_))
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::Name(name) => f.write_str(name),
            LocationQuery::Coordinates(c) => write!(f, "{},{}", c.lat, c.lon),
        }
    }
}
