//! Request functions that sit between the provider and the state containers.

use crate::{
    error::WeatherError,
    location::LocationQuery,
    model::{Coordinates, Forecast},
    provider::WeatherProvider,
};

/// Most suggestions requested from and returned by the geocoder.
pub const SUGGESTION_LIMIT: usize = 5;

/// "Name, Country" labels for places matching `query`.
///
/// Queries of one character or less return nothing without touching the
/// network. A not-found answer is an empty result, not an error.
pub async fn fetch_suggestions(
    provider: &dyn WeatherProvider,
    query: &str,
) -> Result<Vec<String>, WeatherError> {
    if query.chars().count() <= 1 {
        return Ok(Vec::new());
    }

    match provider.search_places(query, SUGGESTION_LIMIT).await {
        Ok(places) => Ok(places
            .iter()
            .take(SUGGESTION_LIMIT)
            .map(|place| place.label())
            .collect()),
        Err(err) if err.is_not_found() => {
            tracing::debug!(%query, "no places matched");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Forecast for a place name or a strict `"lat,lon"` pair.
pub async fn fetch_forecast(
    provider: &dyn WeatherProvider,
    location: &str,
) -> Result<Forecast, WeatherError> {
    let query = LocationQuery::parse(location);
    tracing::info!(location = %query, by_coordinates = query.is_coordinates(), "fetching forecast");
    provider.forecast(&query).await
}

/// "Name, Country" of the place at `coords`, if the geocoder knows one.
pub async fn reverse_label(
    provider: &dyn WeatherProvider,
    coords: Coordinates,
) -> Result<Option<String>, WeatherError> {
    let places = provider.reverse_geocode(coords, 1).await?;
    Ok(places.first().map(|place| place.label()))
}
