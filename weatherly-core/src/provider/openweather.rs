use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::DEFAULT_API_BASE_URL,
    error::WeatherError,
    location::LocationQuery,
    model::{Coordinates, Forecast, GeoPlace},
};

use super::WeatherProvider;

const GEO_DIRECT_PATH: &str = "/geo/1.0/direct";
const GEO_REVERSE_PATH: &str = "/geo/1.0/reverse";
const FORECAST_PATH: &str = "/data/2.5/forecast";

/// How non-2xx responses are turned into errors.
#[derive(Debug, Clone, Copy)]
enum StatusPolicy {
    /// Map 401/404/429 onto dedicated variants.
    Classified,
    /// Every failure becomes `Upstream` with the raw body.
    Raw,
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(WeatherError::MissingApiKey)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        policy: StatusPolicy,
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%path, ?params, "OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", api_key)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%path, status = status.as_u16(), "OpenWeather request failed");
            return Err(status_error(status, &body, policy));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn status_error(status: StatusCode, body: &str, policy: StatusPolicy) -> WeatherError {
    match (policy, status) {
        (StatusPolicy::Classified, StatusCode::UNAUTHORIZED) => WeatherError::Auth,
        (StatusPolicy::Classified, StatusCode::NOT_FOUND) => WeatherError::NotFound,
        (StatusPolicy::Classified, StatusCode::TOO_MANY_REQUESTS) => WeatherError::RateLimited,
        (StatusPolicy::Classified, _) => {
            let message = serde_json::from_str::<OwErrorBody>(body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| truncate_body(body));
            WeatherError::Upstream {
                status: status.as_u16(),
                body: message,
            }
        }
        (StatusPolicy::Raw, _) => WeatherError::Upstream {
            status: status.as_u16(),
            body: truncate_body(body),
        },
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn search_places(&self, query: &str, limit: usize) -> Result<Vec<GeoPlace>, WeatherError> {
        self.get_json(
            GEO_DIRECT_PATH,
            &[("q", query.to_string()), ("limit", limit.to_string())],
            StatusPolicy::Classified,
        )
        .await
    }

    async fn reverse_geocode(
        &self,
        coords: Coordinates,
        limit: usize,
    ) -> Result<Vec<GeoPlace>, WeatherError> {
        self.get_json(
            GEO_REVERSE_PATH,
            &[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("limit", limit.to_string()),
            ],
            StatusPolicy::Classified,
        )
        .await
    }

    async fn forecast(&self, location: &LocationQuery) -> Result<Forecast, WeatherError> {
        let mut params = match location {
            LocationQuery::Name(name) => vec![("q", name.clone())],
            LocationQuery::Coordinates(c) => {
                vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())]
            }
        };
        params.push(("units", "metric".to_string()));

        self.get_json(FORECAST_PATH, &params, StatusPolicy::Raw).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
