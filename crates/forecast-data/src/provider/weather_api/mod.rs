//! WeatherAPI forecast provider implementation.
//!
//! Fetches daily maximum temperatures from api.weatherapi.com. Requires an
//! `APIKey` parameter, injected via `set_param` before registration.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ForecastError;
use crate::provider::WeatherProvider;
use crate::scope::RequestScope;

const BASE_URL: &str = "https://api.weatherapi.com/v1/forecast.json";
const PROVIDER_ID: &str = "WeatherAPI";

/// Parameter key for the API key.
const PARAM_API_KEY: &str = "APIKey";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Forecast response from the WeatherAPI forecast endpoint.
#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    forecast: Option<WeatherApiForecast>,
}

#[derive(Debug, Deserialize)]
struct WeatherApiForecast {
    #[serde(default)]
    forecastday: Vec<WeatherApiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WeatherApiForecastDay {
    day: WeatherApiDay,
}

#[derive(Debug, Deserialize)]
struct WeatherApiDay {
    maxtemp_c: f64,
}

/// WeatherAPI forecast provider.
///
/// Holds a named parameter bag; the `APIKey` entry is read at use time, so a
/// missing or mistyped key surfaces as a fetch error rather than a
/// configuration error.
pub struct WeatherApiProvider {
    client: Client,
    base_url: String,
    params: HashMap<String, Value>,
}

impl WeatherApiProvider {
    /// Create a new WeatherAPI provider against the public API.
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
            params: HashMap::new(),
        }
    }

    /// The configured API key, checked at use time per the provider contract.
    fn api_key(&self) -> Result<&str, ForecastError> {
        self.params
            .get(PARAM_API_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| ForecastError::MissingParam {
                provider: PROVIDER_ID.to_string(),
                param: PARAM_API_KEY.to_string(),
            })
    }

    async fn fetch(&self, date: NaiveDate, lat: &str, lon: &str) -> Result<f64, ForecastError> {
        let key = self.api_key()?;
        let day = date.format("%Y-%m-%d").to_string();
        let url = format!(
            "{}?key={}&q={},{}&dt={}",
            self.base_url, key, lat, lon, day
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ForecastError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: format!("unexpected status {}", response.status()),
            });
        }

        let data: WeatherApiResponse =
            response.json().await.map_err(|e| ForecastError::Decode {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        Self::reduce(data, &day)
    }

    /// Reduce a decoded payload to the single max temperature for `day`.
    fn reduce(data: WeatherApiResponse, day: &str) -> Result<f64, ForecastError> {
        data.forecast
            .and_then(|f| f.forecastday.into_iter().next())
            .map(|d| d.day.maxtemp_c)
            .ok_or_else(|| ForecastError::Decode {
                provider: PROVIDER_ID.to_string(),
                message: format!("no forecast returned for {}", day),
            })
    }
}

impl Default for WeatherApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    fn name(&self) -> &'static str {
        PROVIDER_ID
    }

    fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    fn set_param(&mut self, key: &str, value: Value) {
        self.params.insert(key.to_string(), value);
    }

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
