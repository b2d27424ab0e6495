//! Provider aggregation layer.
//!
//! Combines per-provider forecasts into one [`ProviderForecast`], querying
//! providers sequentially in configuration order and short-circuiting on the
//! first failure.

use std::sync::Arc;

use log::debug;

use crate::errors::ForecastError;
use crate::fetch::fetch_forecast_days;
use crate::models::ProviderForecast;
use crate::provider::WeatherProvider;
use crate::scope::RequestScope;

/// Aggregate the forecast across all configured providers.
///
/// Providers are queried one after another, in the order they were
/// configured; provider `k + 1` is never started before provider `k` has
/// finished. The first provider error aborts the whole call: no further
/// providers are queried and nothing partial is returned, not even forecasts
/// already fetched from earlier providers.
///
/// On success the result holds exactly one entry per provider, keyed by
/// [`WeatherProvider::name`].
pub async fn aggregate_forecast(
    scope: &RequestScope,
    lat: &str,
    lon: &str,
    providers: &[Arc<dyn WeatherProvider>],
) -> Result<ProviderForecast, ForecastError> {
    let mut result = ProviderForecast::new();
    for provider in providers {
        let days = fetch_forecast_days(provider.as_ref(), scope, lat, lon).await?;
        debug!("{} contributed {} days", provider.name(), days.len());
        result.insert(provider.name().to_string(), days);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use serde_json::Value;

    use super::*;
    use crate::models::FETCH_DAYS_COUNT;

    /// Test provider returning a fixed temperature, an error, or nothing.
    struct StubProvider {
        name: &'static str,
        temperature: Option<f64>,
        error_message: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn ok(name: &'static str, temperature: f64) -> Self {
            Self {
                name,
                temperature: Some(temperature),
                error_message: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(name: &'static str, message: &'static str) -> Self {
            Self {
                name,
                temperature: None,
                error_message: Some(message),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn param(&self, _key: &str) -> Option<&Value> {
            None
        }

        fn set_param(&mut self, _key: &str, _value: Value) {}

        async fn fetch_day(
            &self,
            scope: &RequestScope,
            _date: NaiveDate,
            _lat: &str,
            _lon: &str,
        ) -> Option<Result<f64, ForecastError>> {
            if scope.is_cancelled() {
                return None;
            }
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.error_message {
                Some(message) => Some(Err(ForecastError::Provider {
                    provider: self.name.to_string(),
                    message: message.to_string(),
                })),
                None => self.temperature.map(Ok),
            }
        }
    }

    /// Test provider that answers only for today, leaving the rest of the
    /// window unrecorded.
    struct SingleDayProvider {
        name: &'static str,
        temperature: f64,
    }

    #[async_trait]
    impl WeatherProvider for SingleDayProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        fn param(&self, _key: &str) -> Option<&Value> {
            None
        }

        fn set_param(&mut self, _key: &str, _value: Value) {}

        async fn fetch_day(
            &self,
            scope: &RequestScope,
            date: NaiveDate,
            _lat: &str,
            _lon: &str,
        ) -> Option<Result<f64, ForecastError>> {
            if scope.is_cancelled() {
                return None;
            }
            if date == Utc::now().date_naive() {
                Some(Ok(self.temperature))
            } else {
                None
            }
        }
    }

    #[tokio::test]
    async fn test_single_day_windows_aggregate_exactly() {
        let providers: Vec<Arc<dyn WeatherProvider>> = vec![
            Arc::new(SingleDayProvider {
                name: "A",
                temperature: 25.0,
            }),
            Arc::new(SingleDayProvider {
                name: "B",
                temperature: 27.0,
            }),
        ];
        let scope = RequestScope::new();

        let result = aggregate_forecast(&scope, "52.52", "13.41", &providers)
            .await
            .unwrap();

        let date = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let expected = serde_json::json!({
            "A": { (date.clone()): { "temperature": 25.0 } },
            "B": { (date): { "temperature": 27.0 } },
        });
        assert_eq!(serde_json::to_value(&result).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_all_providers_succeed() {
        let providers: Vec<Arc<dyn WeatherProvider>> = vec![
            Arc::new(StubProvider::ok("A", 25.0)),
            Arc::new(StubProvider::ok("B", 27.0)),
        ];
        let scope = RequestScope::new();

        let result = aggregate_forecast(&scope, "52.52", "13.41", &providers)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result["A"].len(), FETCH_DAYS_COUNT);
        assert_eq!(result["B"].len(), FETCH_DAYS_COUNT);
        assert!(result["A"].values().all(|d| d.temperature == 25.0));
        assert!(result["B"].values().all(|d| d.temperature == 27.0));
    }

    #[tokio::test]
    async fn test_first_failure_short_circuits() {
        let failing = Arc::new(StubProvider::failing("bad", "fetch error"));
        let untouched = Arc::new(StubProvider::ok("late", 20.0));
        let providers: Vec<Arc<dyn WeatherProvider>> =
            vec![Arc::new(StubProvider::ok("ok", 19.0)), failing.clone(), untouched.clone()];
        let scope = RequestScope::new();

        let err = aggregate_forecast(&scope, "52.52", "13.41", &providers)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("fetch error"));
        // The provider after the failing one is never queried.
        assert_eq!(untouched.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancelled_scope_yields_empty_maps_per_provider() {
        let providers: Vec<Arc<dyn WeatherProvider>> = vec![
            Arc::new(StubProvider::ok("A", 25.0)),
            Arc::new(StubProvider::ok("B", 27.0)),
        ];
        let scope = RequestScope::with_timeout(Duration::ZERO);

        let result = aggregate_forecast(&scope, "52.52", "13.41", &providers)
            .await
            .unwrap();

        // Cancellation before dispatch is vacuous success: every provider
        // contributes an empty map and no network calls happen.
        assert_eq!(result.len(), 2);
        assert!(result["A"].is_empty());
        assert!(result["B"].is_empty());
    }

    #[tokio::test]
    async fn test_aggregate_serializes_to_the_wire_shape() {
        let providers: Vec<Arc<dyn WeatherProvider>> = vec![
            Arc::new(StubProvider::ok("A", 25.0)),
            Arc::new(StubProvider::ok("B", 27.0)),
        ];
        let scope = RequestScope::new();

        let result = aggregate_forecast(&scope, "52.52", "13.41", &providers)
            .await
            .unwrap();
        let value = serde_json::to_value(&result).unwrap();

        let (date, _) = result["A"].iter().next().unwrap();
        assert_eq!(value["A"][date]["temperature"], 25.0);
        assert_eq!(value["B"][date]["temperature"], 27.0);
    }
}
