//! Open-Meteo forecast provider implementation.
//!
//! Fetches daily maximum temperatures from the Open-Meteo forecast API.
//! The API is keyless, so this provider takes no parameters.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ForecastError;
use crate::provider::WeatherProvider;
use crate::scope::RequestScope;

const BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";
const PROVIDER_ID: &str = "OpenMeteo";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Forecast response from the Open-Meteo API.
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
}

/// Open-Meteo forecast provider.
///
/// Keyless: `param`/`set_param` are no-ops, exactly as declared by the
/// provider contract.
pub struct OpenMeteoProvider {
    client: Client,
    base_url: String,
}

impl OpenMeteoProvider {
    /// Create a new Open-Meteo provider against the public API.
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Create a provider against a custom base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, date: NaiveDate, lat: &str, lon: &str) -> Result<f64, ForecastError> {
        let day = date.format("%Y-%m-%d").to_string();
        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&daily=temperature_2m_max&timezone=UTC",
            self.base_url, lat, lon, day, day
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ForecastError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: format!("unexpected status {}", response.status()),
            });
        }

        let data: OpenMeteoResponse =
            response.json().await.map_err(|e| ForecastError::Decode {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        Self::reduce(data, &day)
    }

    /// Reduce a decoded payload to the single temperature for `day`.
    fn reduce(data: OpenMeteoResponse, day: &str) -> Result<f64, ForecastError> {
        data.daily
            .and_then(|d| d.temperature_2m_max.first().copied())
            .ok_or_else(|| ForecastError::Decode {
                provider: PROVIDER_ID.to_string(),
                message: format!("no temperature returned for {}", day),
            })
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &'static str {
        PROVIDER_ID
    }

    fn param(&self, _key: &str) -> Option<&Value> {
        None
    }

    fn set_param(&mut self, _key: &str, _value: Value) {}

    async fn fetch_day(
        &self,
        scope: &RequestScope,
        date: NaiveDate,
        lat: &str,
        lon: &str,
    ) -> Option<Result<f64, ForecastError>> {
        if scope.is_cancelled() {
            return None;
        }
        Some(self.fetch(date, lat, lon).await)
    }
}
