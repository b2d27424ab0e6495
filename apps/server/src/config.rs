//! Server configuration.
//!
//! Scalar settings come from the environment (`NIMBUS_*` variables, with a
//! `.env` file honored in development). The provider list and per-provider
//! parameter bags live in a YAML file referenced by `NIMBUS_PROVIDERS_FILE`:
//!
//! ```yaml
//! providers:
//!   OpenMeteo: {}
//!   WeatherAPI:
//!     APIKey: "..."
//! ```

use std::env;
use std::time::Duration;

use anyhow::Context;
use serde_json::Value;

/// Immutable server configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub listen_addr: String,
    /// Uniform wall-clock budget, in seconds, for one aggregation query.
    pub api_timeout_secs: u64,
    /// Path to the YAML providers file.
    pub providers_file: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let listen_addr =
            env::var("NIMBUS_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let api_timeout_secs = env::var("NIMBUS_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        let providers_file =
            env::var("NIMBUS_PROVIDERS_FILE").unwrap_or_else(|_| "providers.yml".to_string());

        Self {
            listen_addr,
            api_timeout_secs,
            providers_file,
        }
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }
}

/// One configured provider: its name and named parameter bag.
pub type ProviderEntry = (String, Vec<(String, Value)>);

/// Load the providers file, preserving document order.
///
/// Configuration order determines aggregation order, so the YAML mapping is
/// drained as `serde_yaml::Mapping`, which keeps insertion order, rather
/// than through an unordered map type.
pub fn load_providers(path: &str) -> anyhow::Result<Vec<ProviderEntry>> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read providers file: {}", path))?;
    let doc: serde_yaml::Value =
        serde_yaml::from_str(&data).context("failed to parse providers file")?;
    let mapping = doc
        .get("providers")
        .and_then(serde_yaml::Value::as_mapping)
        .context("providers file must contain a `providers` mapping")?;

    let mut entries = Vec::with_capacity(mapping.len());
    for (name, params) in mapping {
        let name = name
            .as_str()
            .context("provider names must be strings")?
            .to_string();

        let mut bag = Vec::new();
        if let Some(params) = params.as_mapping() {
            for (key, value) in params {
                let key = key
                    .as_str()
                    .with_context(|| format!("parameter keys for {} must be strings", name))?
                    .to_string();
                let value = serde_json::to_value(value)
                    .with_context(|| format!("unsupported parameter value for {}", name))?;
                bag.push((key, value));
            }
        }
        entries.push((name, bag));
    }
    Ok(entries)
}
