//! Core library for the `weatherly` client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and the fetchers built on it
//! - Search, forecast and unit state, driven through [`Store`]
//! - Display computations (daily grouping, hourly rows, current panel)
//! - Location routes and the device seams (position, notifications)
//!
//! It is used by `weatherly-cli`, but can also be reused by other frontends.

pub mod config;
pub mod device;
pub mod error;
pub mod fetch;
pub mod location;
pub mod model;
pub mod provider;
pub mod route;
pub mod state;
pub mod store;
pub mod view;

pub use config::{Config, ReminderConfig};
pub use error::{ErrorKind, LocationError, RouteError, ValidationError, WeatherError};
pub use location::LocationQuery;
pub use model::{Coordinates, Forecast, ForecastEntry, GeoPlace};
pub use provider::{WeatherProvider, provider_from_config};
pub use route::{CityRoute, Screen};
pub use state::{AppState, FetchStatus, TemperatureUnit};
pub use store::Store;
