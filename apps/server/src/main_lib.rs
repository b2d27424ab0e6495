use std::sync::Arc;
use std::time::Duration;

use nimbus_forecast_data::{OpenMeteoProvider, WeatherApiProvider, WeatherProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{load_providers, Config};

/// Shared application state, constructed once at startup and never mutated
/// during request handling.
pub struct AppState {
    /// Configured providers, in configuration order.
    pub providers: Vec<Arc<dyn WeatherProvider>>,
    /// Uniform wall-clock budget for one aggregation query.
    pub api_timeout: Duration,
}

pub fn init_tracing() {
    let log_format = std::env::var("NIMBUS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    anyhow::ensure!(
        config.api_timeout_secs > 0,
        "invalid API timeout: must be positive"
    );

    let entries = load_providers(&config.providers_file)?;
    anyhow::ensure!(!entries.is_empty(), "no providers configured");

    let mut providers: Vec<Arc<dyn WeatherProvider>> = Vec::with_capacity(entries.len());
    for (name, params) in entries {
        let mut provider = build_provider(&name)?;
        // Parameters are applied here, before the instance is shared;
        // after this point the provider is read-only.
        for (key, value) in params {
            provider.set_param(&key, value);
        }
        tracing::info!("registered provider {}", provider.name());
        providers.push(Arc::from(provider));
    }

    Ok(Arc::new(AppState {
        providers,
        api_timeout: config.api_timeout(),
    }))
}

/// The closed set of providers this build knows how to construct.
fn build_provider(name: &str) -> anyhow::Result<Box<dyn WeatherProvider>> {
    match name {
        "OpenMeteo" => Ok(Box::new(OpenMeteoProvider::new())),
        "WeatherAPI" => Ok(Box::new(WeatherApiProvider::new())),
        other => anyhow::bail!("unknown provider in configuration: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_build_provider_rejects_unknown_names() {
        assert!(build_provider("OpenMeteo").is_ok());
        assert!(build_provider("WeatherAPI").is_ok());
        assert!(build_provider("Accuweather").is_err());
    }

    #[test]
    fn test_build_state_applies_params_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"providers:\n  WeatherAPI:\n    APIKey: \"abc\"\n  OpenMeteo: {}\n")
            .unwrap();

        let config = Config {
            listen_addr: "127.0.0.1:0".to_string(),
            api_timeout_secs: 30,
            providers_file: file.path().to_str().unwrap().to_string(),
        };
        let state = build_state(&config).unwrap();

        assert_eq!(state.providers.len(), 2);
        assert_eq!(state.providers[0].name(), "WeatherAPI");
        assert_eq!(
            state.providers[0]
                .param("APIKey")
                .and_then(serde_json::Value::as_str),
            Some("abc")
        );
        assert_eq!(state.providers[1].name(), "OpenMeteo");
        assert_eq!(state.api_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_build_state_rejects_zero_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"providers:\n  OpenMeteo: {}\n").unwrap();

        let config = Config {
            listen_addr: "127.0.0.1:0".to_string(),
            api_timeout_secs: 0,
            providers_file: file.path().to_str().unwrap().to_string(),
        };
        assert!(build_state(&config).is_err());
    }

    #[test]
    fn test_build_state_rejects_empty_provider_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"providers: {}\n").unwrap();

        let config = Config {
            listen_addr: "127.0.0.1:0".to_string(),
            api_timeout_secs: 30,
            providers_file: file.path().to_str().unwrap().to_string(),
        };
        assert!(build_state(&config).is_err());
    }
}
