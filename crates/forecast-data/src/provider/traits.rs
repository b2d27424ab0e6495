//! Weather provider trait definitions.
//!
//! This module defines the core `WeatherProvider` trait that all forecast
//! sources must implement.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::ForecastError;
use crate::scope::RequestScope;

/// Trait for upstream weather forecast providers.
///
/// Implement this trait to add support for a new forecast source. One
/// instance exists per configured provider, constructed and parameterized at
/// startup and then shared immutably for the lifetime of the process.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use nimbus_forecast_data::provider::WeatherProvider;
///
/// struct MyProvider {
///     api_key: Option<String>,
/// }
///
/// #[async_trait]
/// impl WeatherProvider for MyProvider {
///     fn name(&self) -> &'static str {
///         "MyProvider"
///     }
///
///     // ... implement param access and fetch_day
/// }
/// ```
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Stable identifier for this provider.
    ///
    /// Used as the key in the aggregated forecast and in logging.
    fn name(&self) -> &'static str;

    /// Read a named configuration parameter.
    ///
    /// Returns `None` when the parameter was never set. The contract performs
    /// no validation: each implementation inspects and casts what it needs at
    /// use time and may fail then if a required parameter is absent or has
    /// the wrong type.
    fn param(&self, key: &str) -> Option<&Value>;

    /// Set a named configuration parameter.
    ///
    /// Called only during setup, before the instance is registered and
    /// shared. Providers that take no parameters may ignore this.
    fn set_param(&mut self, key: &str, value: Value);

    /// Fetch the forecast temperature for a single calendar date.
    ///
    /// Implementations MUST check `scope` for cancellation before issuing
    /// any network call. If the scope is already cancelled, the fetch returns
    /// `None` without making the call: no value and no error is recorded for
    /// that date, and the caller treats it as "never completed" rather than
    /// as success or failure.
    ///
    /// # Arguments
    ///
    /// * `scope` - The request's execution scope (deadline + cancellation)
    /// * `date` - The calendar date to fetch
    /// * `lat` / `lon` - Decimal coordinate strings, already range-checked
    ///   by the caller
    ///
    /// # Returns
    ///
    /// `None` when cancelled before dispatch, otherwise the temperature for
    /// that date or a [`ForecastError`].
    async fn fetch_day(
        &self,
        scope: &RequestScope,
        date: NaiveDate,
        lat: &str,
        lon: &str,
    ) -> Option<Result<f64, ForecastError>>;
}
