//! Location-scoped navigation paths.
//!
//! A city screen lives under `/<segment>`, where the segment is either a
//! lower-cased place name or the percent-encoded string `lat=<lat>&lon=<lon>`.
//! Sub-screens append `/forecast` (daily) or `/hourly`.

use std::fmt;

use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::form_urlencoded;

use crate::{error::RouteError, model::Coordinates};

/// Which location a city screen is about.
#[derive(Debug, Clone, PartialEq)]
pub enum CityRoute {
    Place(String),
    Coordinates(Coordinates),
}

impl CityRoute {
    /// Route for free text picked from search: trimmed, lower-cased, and
    /// reduced to the part before the first comma ("Paris, FR" -> "paris").
    pub fn from_search(input: &str) -> Result<Self, RouteError> {
        let lowered = input.trim().to_lowercase();
        Self::place_from_segment(&lowered)
    }

    /// Parse a (possibly percent-encoded) path segment.
    pub fn parse(segment: &str) -> Result<Self, RouteError> {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();

        if decoded.starts_with("lat=") {
            return Self::coordinates_from_query(&decoded);
        }

        Self::place_from_segment(&decoded)
    }

    fn place_from_segment(decoded: &str) -> Result<Self, RouteError> {
        let city = decoded.split(',').next().unwrap_or_default().trim();
        if city.is_empty() {
            return Err(RouteError::EmptySegment);
        }
        Ok(CityRoute::Place(city.to_string()))
    }

    fn coordinates_from_query(decoded: &str) -> Result<Self, RouteError> {
        let mut lat = None;
        let mut lon = None;

        for (key, value) in form_urlencoded::parse(decoded.as_bytes()) {
            match key.as_ref() {
                "lat" => lat = value.parse::<f64>().ok(),
                "lon" => lon = value.parse::<f64>().ok(),
                _ => {}
            }
        }

        match (lat, lon) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Ok(CityRoute::Coordinates(Coordinates::new(lat, lon)))
            }
            _ => Err(RouteError::InvalidCoordinates(decoded.to_string())),
        }
    }

    /// Encoded path segment for this route.
    pub fn to_segment(&self) -> String {
        let raw = match self {
            CityRoute::Place(name) => name.trim().to_lowercase(),
            CityRoute::Coordinates(c) => form_urlencoded::Serializer::new(String::new())
                .append_pair("lat", &c.lat.to_string())
                .append_pair("lon", &c.lon.to_string())
                .finish(),
        };
        utf8_percent_encode(&raw, NON_ALPHANUMERIC).to_string()
    }

    /// Location string handed to the forecast fetcher.
    pub fn forecast_key(&self) -> String {
        match self {
            CityRoute::Place(name) => name.clone(),
            CityRoute::Coordinates(c) => format!("{},{}", c.lat, c.lon),
        }
    }

    pub fn path(&self, screen: Screen) -> String {
        match screen.suffix() {
            Some(suffix) => format!("/{}/{suffix}", self.to_segment()),
            None => format!("/{}", self.to_segment()),
        }
    }

    /// Split a full path such as `/london/hourly` into route and screen.
    pub fn parse_path(path: &str) -> Result<(Self, Screen), RouteError> {
        let mut parts = path.trim_start_matches('/').splitn(2, '/');
        let segment = parts.next().unwrap_or_default();
        let screen = match parts.next() {
            None | Some("") => Screen::Current,
            Some(other) => Screen::from_suffix(other)?,
        };
        Ok((Self::parse(segment)?, screen))
    }
}

impl fmt::Display for CityRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityRoute::Place(name) => f.write_str(name),
            CityRoute::Coordinates(c) => c.fmt(f),
        }
    }
}

/// Screens available under a city route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Current,
    Daily,
    Hourly,
}

impl Screen {
    fn suffix(self) -> Option<&'static str> {
        match self {
            Screen::Current => None,
            Screen::Daily => Some("forecast"),
            Screen::Hourly => Some("hourly"),
        }
    }

    fn from_suffix(suffix: &str) -> Result<Self, RouteError> {
        match suffix.trim_end_matches('/') {
            "" => Ok(Screen::Current),
            "forecast" => Ok(Screen::Daily),
            "hourly" => Ok(Screen::Hourly),
            other => Err(RouteError::UnknownScreen(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_text_becomes_lowercase_city() {
        assert_eq!(
            CityRoute::from_search("  Paris, FR ").unwrap(),
            CityRoute::Place("paris".into())
        );
        assert_eq!(CityRoute::from_search(" , FR"), Err(RouteError::EmptySegment));
    }

    #[test]
    fn coordinate_segment_roundtrips() {
        let route = CityRoute::Coordinates(Coordinates::new(51.5, -0.12));
        let segment = route.to_segment();
        assert!(!segment.contains('='));
        assert!(!segment.contains('&'));
        assert_eq!(CityRoute::parse(&segment).unwrap(), route);
        assert_eq!(route.forecast_key(), "51.5,-0.12");
    }

    #[test]
    fn unencoded_coordinate_segment_is_accepted() {
        assert_eq!(
            CityRoute::parse("lat=40.7&lon=-74").unwrap(),
            CityRoute::Coordinates(Coordinates::new(40.7, -74.0))
        );
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        assert!(matches!(
            CityRoute::parse("lat=abc&lon=1"),
            Err(RouteError::InvalidCoordinates(_))
        ));
        assert!(matches!(
            CityRoute::parse("lat=1"),
            Err(RouteError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn place_segment_keeps_text_before_comma() {
        assert_eq!(
            CityRoute::parse("new%20york%2C%20us").unwrap(),
            CityRoute::Place("new york".into())
        );
    }

    #[test]
    fn paths_carry_screen_suffix() {
        let route = CityRoute::Place("London".into());
        assert_eq!(route.path(Screen::Current), "/london");
        assert_eq!(route.path(Screen::Daily), "/london/forecast");

        let (parsed, screen) = CityRoute::parse_path("/london/hourly").unwrap();
        assert_eq!(parsed, CityRoute::Place("london".into()));
        assert_eq!(screen, Screen::Hourly);

        assert_eq!(
            CityRoute::parse_path("/london/map"),
            Err(RouteError::UnknownScreen("map".into()))
        );
    }
}
