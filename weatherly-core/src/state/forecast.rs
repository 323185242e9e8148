use crate::{error::WeatherError, model::Forecast};

use super::{FetchStatus, RequestToken, RequestTracker};

/// Most recently fetched forecast.
///
/// A successful fetch replaces `data` wholesale; a failed one only records
/// the error and leaves the previous payload in place.
#[derive(Debug, Clone, Default)]
pub struct ForecastState {
    pub data: Option<Forecast>,
    pub status: FetchStatus,
    pub error: Option<String>,
    requests: RequestTracker,
}

impl ForecastState {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Pending
    }

    pub fn begin_fetch(&mut self) -> RequestToken {
        self.status = FetchStatus::Pending;
        self.error = None;
        self.requests.issue()
    }

    /// Apply a fetch outcome. Returns `false` if a newer fetch superseded it.
    pub fn settle(&mut self, token: RequestToken, result: Result<Forecast, WeatherError>) -> bool {
        if !self.requests.is_current(token) {
            return false;
        }

        match result {
            Ok(forecast) => {
                self.status = FetchStatus::Fulfilled;
                self.data = Some(forecast);
            }
            Err(err) => {
                self.status = FetchStatus::Rejected;
                self.error = Some(err.to_string());
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.data = None;
        self.error = None;
    }
}
