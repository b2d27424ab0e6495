//! Forecast data models
//!
//! This module contains the core data types for forecast operations:
//! - `forecast` - Forecast value types (ForecastData, ForecastDay, ProviderForecast)

mod forecast;

pub use forecast::{ForecastData, ForecastDay, ProviderForecast, FETCH_DAYS_COUNT};
