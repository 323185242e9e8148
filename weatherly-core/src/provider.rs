use crate::{
    Config,
    error::WeatherError,
    location::LocationQuery,
    model::{Coordinates, Forecast, GeoPlace},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Remote geocoding and forecast lookups.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Places whose name matches `query`, best match first.
    async fn search_places(&self, query: &str, limit: usize) -> Result<Vec<GeoPlace>, WeatherError>;

    /// Places at or near `coords`.
    async fn reverse_geocode(
        &self,
        coords: Coordinates,
        limit: usize,
    ) -> Result<Vec<GeoPlace>, WeatherError>;

    /// Multi-day, 3-hourly forecast in metric units.
    async fn forecast(&self, location: &LocationQuery) -> Result<Forecast, WeatherError>;
}

/// Construct the OpenWeather provider described by `config`.
///
/// A missing API key is not an error here; every request made through the
/// provider fails with [`WeatherError::MissingApiKey`] instead.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenWeatherProvider::with_base_url(
        config.resolved_api_key(),
        config.api_base_url.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        // Nothing listens on the discard port; the key check must short-circuit.
        let provider: Arc<dyn WeatherProvider> =
            Arc::new(OpenWeatherProvider::with_base_url(None, "http://127.0.0.1:9"));

        let err = provider
            .forecast(&LocationQuery::Name("London".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));

        let err = provider.search_places("Paris", 5).await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingApiKey));
    }
}
