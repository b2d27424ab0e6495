//! Nimbus Forecast Data Crate
//!
//! This crate provides provider-agnostic forecast fetching and aggregation
//! for the nimbus weather service.
//!
//! # Overview
//!
//! The forecast data crate supports:
//! - Multiple upstream providers: Open-Meteo, WeatherAPI
//! - A fixed 5-day lookahead window fetched concurrently per provider
//! - Per-request deadline propagation with cooperative cancellation
//! - First-error short-circuit aggregation across providers
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  RequestScope    |  (one deadline per incoming query)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   Aggregation    |  (providers in order, short-circuit on error)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |  Fan-out engine  |  (5 concurrent day-tasks, join, ordered merge)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (Open-Meteo, WeatherAPI, ...)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |   ForecastDay    |  (date -> temperature)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ForecastData`] - Temperature for one date
//! - [`ForecastDay`] - One provider's dated forecast map
//! - [`ProviderForecast`] - Aggregated forecasts keyed by provider name
//! - [`RequestScope`] - Per-query deadline and cancellation
//! - [`ForecastError`] - Error taxonomy for fetch and merge failures

pub mod aggregate;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod provider;
pub mod scope;

// Re-export all public types from models
pub use models::{ForecastData, ForecastDay, ProviderForecast, FETCH_DAYS_COUNT};

// Re-export provider types
pub use provider::open_meteo::OpenMeteoProvider;
pub use provider::weather_api::WeatherApiProvider;
pub use provider::WeatherProvider;

// Re-export the orchestration entry points
pub use aggregate::aggregate_forecast;
pub use errors::ForecastError;
pub use fetch::fetch_forecast_days;
pub use scope::RequestScope;
