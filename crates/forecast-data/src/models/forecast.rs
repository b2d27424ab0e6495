use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of days fetched per provider: today through today + 4.
pub const FETCH_DAYS_COUNT: usize = 5;

/// Forecast values for a single calendar date.
///
/// Wire shape: `{"temperature": <number>}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastData {
    /// Daily maximum temperature in degrees Celsius.
    pub temperature: f64,
}

/// Forecast for one provider, keyed by ISO-8601 date (`YYYY-MM-DD`).
///
/// On success from one provider this holds exactly [`FETCH_DAYS_COUNT`]
/// entries. A merge never returns a partially populated map, with one
/// documented exception: a scope cancelled before any day-task starts yields
/// an empty map (see the fetch module).
pub type ForecastDay = HashMap<String, ForecastData>;

/// Aggregated forecast across providers, keyed by provider name.
pub type ProviderForecast = HashMap<String, ForecastDay>;
