//! Weather provider abstractions and implementations.
//!
//! This module contains:
//! - The `WeatherProvider` trait that all providers implement
//! - Concrete provider implementations (Open-Meteo, WeatherAPI)
//!
//! # Architecture
//!
//! The provider system is designed to be:
//! - **Provider-agnostic**: the fan-out engine and aggregation layer only
//!   see the trait
//! - **Extensible**: new upstream sources are added by implementing
//!   `WeatherProvider` and registering the name in the server's builder
//! - **Read-mostly**: parameters are injected via `set_param` at setup time;
//!   after registration an instance is shared immutably across all requests

mod traits;

// Provider implementations
pub mod open_meteo;
pub mod weather_api;

// Re-exports
pub use traits::WeatherProvider;
