//! Error types shared by the fetchers, the store and the device seams.

use thiserror::Error;

/// Failure of a request against the weather/geocoding API.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "Weather API key is missing.\n\
         Hint: run `weatherly configure` or set the WEATHERLY_API_KEY environment variable."
    )]
    MissingApiKey,

    #[error("Invalid API key")]
    Auth,

    #[error("Location not found")]
    NotFound,

    #[error("Too many requests, please try again later")]
    RateLimited,

    #[error("Status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Coarse classification of a [`WeatherError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Auth,
    NotFound,
    RateLimit,
    Upstream,
    Network,
    Parse,
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::MissingApiKey => ErrorKind::Configuration,
            WeatherError::Auth => ErrorKind::Auth,
            WeatherError::NotFound => ErrorKind::NotFound,
            WeatherError::RateLimited => ErrorKind::RateLimit,
            WeatherError::Upstream { .. } => ErrorKind::Upstream,
            WeatherError::Network(_) => ErrorKind::Network,
            WeatherError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// True for a classified not-found as well as a raw upstream 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WeatherError::NotFound | WeatherError::Upstream { status: 404, .. }
        )
    }
}

/// Failure of the device location service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location access is required.")]
    PermissionDenied,

    #[error("Could not determine location: {0}")]
    Unavailable(String),
}

/// Rejection of user-entered search text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a city name")]
    Empty,

    #[error("Please enter a valid city name")]
    Invalid,

    #[error("No suggestion at position {0}")]
    NoSuchSuggestion(usize),
}

/// Failure to interpret a location path segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Location segment is empty")]
    EmptySegment,

    #[error("Invalid coordinates in location segment '{0}'")]
    InvalidCoordinates(String),

    #[error("Unknown screen '{0}'")]
    UnknownScreen(String),
}
