//! Application state object and the actions that mutate it.
//!
//! `Store` is cheap to clone; clones share one [`AppState`]. Every fetch takes
//! a token from its slot before going to the network and only writes its
//! result back if no newer fetch was started in the meantime.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::{
    device::{self, LocationService},
    error::{LocationError, ValidationError},
    fetch,
    provider::WeatherProvider,
    route::CityRoute,
    state::{
        AppState, TemperatureUnit,
        search::{validate_city_name, wants_suggestions},
    },
};

#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<Mutex<AppState>>,
    provider: Arc<dyn WeatherProvider>,
    search_debounce: Duration,
    pending_search: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Store {
    pub fn new(provider: Arc<dyn WeatherProvider>, search_debounce: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::default())),
            provider,
            search_debounce,
            pending_search: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_unit(self, unit: TemperatureUnit) -> Self {
        self.state.lock().unit.temperature_unit = unit;
        self
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> AppState {
        self.state.lock().clone()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.state.lock().unit.temperature_unit
    }

    pub fn toggle_unit(&self) -> TemperatureUnit {
        self.state.lock().unit.toggle()
    }

    /// Handle a keystroke in the search box.
    ///
    /// Text long enough to search schedules a suggestion fetch after the
    /// debounce delay, replacing any fetch still waiting; shorter text clears
    /// the suggestions at once. Must be called inside a tokio runtime.
    pub fn set_query(&self, text: &str) {
        {
            let mut state = self.state.lock();
            state.search.set_query(text);
            state.search.set_error(None);
        }

        if wants_suggestions(text) {
            self.schedule_suggestions(text.to_string());
        } else {
            self.cancel_scheduled_search();
            self.state.lock().search.clear_suggestions();
        }
    }

    fn schedule_suggestions(&self, query: String) {
        let store = self.clone();
        let delay = self.search_debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.fetch_suggestions(&query).await;
        });

        if let Some(previous) = self.pending_search.lock().replace(handle) {
            previous.abort();
        }
    }

    fn cancel_scheduled_search(&self) {
        if let Some(previous) = self.pending_search.lock().take() {
            previous.abort();
        }
    }

    /// Wait for the scheduled suggestion fetch, if any, to finish.
    pub async fn settle_search(&self) {
        let handle = self.pending_search.lock().take();
        if let Some(handle) = handle
            && let Err(err) = handle.await
            && !err.is_cancelled()
        {
            tracing::warn!(%err, "suggestion task failed");
        }
    }

    /// Fetch suggestions for `query` right away and store the outcome.
    pub async fn fetch_suggestions(&self, query: &str) {
        let token = self.state.lock().search.begin_fetch();
        let result = fetch::fetch_suggestions(self.provider.as_ref(), query).await;

        if let Err(err) = &result {
            tracing::warn!(%query, %err, "suggestion fetch failed");
        }
        if !self.state.lock().search.settle(token, result) {
            tracing::debug!(%query, "discarding stale suggestions");
        }
    }

    pub fn set_highlighted_index(&self, index: Option<usize>) {
        self.state.lock().search.set_highlighted_index(index);
    }

    pub fn highlight_next(&self) {
        self.state.lock().search.highlight_next();
    }

    pub fn highlight_previous(&self) {
        self.state.lock().search.highlight_previous();
    }

    /// Empty the search box and drop suggestions.
    pub fn clear_search(&self) {
        self.cancel_scheduled_search();
        self.state.lock().search.reset();
    }

    /// Pick a suggestion and turn it into a city route.
    pub fn select_suggestion(&self, index: usize) -> Result<CityRoute, ValidationError> {
        let label = {
            let mut state = self.state.lock();
            let label = state
                .search
                .suggestions
                .get(index)
                .cloned()
                .ok_or(ValidationError::NoSuchSuggestion(index))?;
            state.search.set_query(label.clone());
            label
        };
        self.cancel_scheduled_search();
        self.state.lock().search.clear_suggestions();

        self.navigate_to_search(&label)
    }

    /// Submit whatever is in the search box.
    pub fn submit(&self) -> Result<CityRoute, ValidationError> {
        let query = self.state.lock().search.query.clone();
        self.navigate_to_search(&query)
    }

    fn navigate_to_search(&self, text: &str) -> Result<CityRoute, ValidationError> {
        validate_city_name(text)?;
        let route = CityRoute::from_search(text).map_err(|_| ValidationError::Empty)?;
        self.clear_search();
        Ok(route)
    }

    /// Route to wherever the device says we are.
    pub async fn use_my_location(
        &self,
        service: &dyn LocationService,
    ) -> Result<CityRoute, LocationError> {
        let coords = device::locate(service).await?;
        self.clear_search();
        Ok(CityRoute::Coordinates(coords))
    }

    /// Fetch the forecast for `location` and store the outcome.
    pub async fn load_forecast(&self, location: &str) {
        let token = self.state.lock().forecast.begin_fetch();
        let result = fetch::fetch_forecast(self.provider.as_ref(), location).await;

        if let Err(err) = &result {
            tracing::warn!(%location, %err, "forecast fetch failed");
        }
        if !self.state.lock().forecast.settle(token, result) {
            tracing::debug!(%location, "discarding stale forecast");
        }
    }

    /// Enter a city screen: reset search, resolve a label, load the forecast.
    ///
    /// Returns the label to show as the screen heading.
    pub async fn open_city(&self, route: &CityRoute) -> String {
        self.clear_search();
        let key = route.forecast_key();
        let (label, ()) = tokio::join!(self.location_label(route), self.load_forecast(&key));
        label
    }

    async fn location_label(&self, route: &CityRoute) -> String {
        match route {
            CityRoute::Place(name) => name.clone(),
            CityRoute::Coordinates(coords) => {
                match fetch::reverse_label(self.provider.as_ref(), *coords).await {
                    Ok(Some(label)) => label,
                    Ok(None) => coords.to_string(),
                    Err(err) => {
                        tracing::warn!(%err, "reverse geocoding failed, showing coordinates");
                        coords.to_string()
                    }
                }
            }
        }
    }
}
