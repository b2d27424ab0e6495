//! Error types for the forecast data crate.
//!
//! All fetch and merge failures funnel into [`ForecastError`]. Every variant
//! is fatal to the enclosing merge and aggregation: there is no retry, no
//! fallback provider, and no partial result anywhere in this crate.

use thiserror::Error;

/// Errors that can occur while fetching or merging forecast data.
#[derive(Error, Debug)]
pub enum ForecastError {
    /// The underlying network call to a provider failed.
    /// Surfaced as-is and recorded against the date being fetched.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider responded but the payload could not be reduced to the
    /// expected temperature value.
    #[error("Decode error: {provider} - {message}")]
    Decode {
        /// The provider whose payload failed to decode
        provider: String,
        /// Description of the decode failure
        message: String,
    },

    /// A required provider parameter is absent or has the wrong type.
    /// Discovered at use time, never at configuration time.
    #[error("Missing or invalid parameter for {provider}: {param}")]
    MissingParam {
        /// The provider that needed the parameter
        provider: String,
        /// The parameter key that was absent or mistyped
        param: String,
    },

    /// A provider-specific upstream error, e.g. a non-2xx response.
    #[error("Provider error: {provider} - {message}")]
    Provider {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A day-task recorded a value the merge does not recognize as a valid
    /// temperature. Synthesized by the fan-out engine, not attributable to a
    /// specific upstream cause.
    #[error("unknown result type from the request")]
    UnknownResult,

    /// The request scope's deadline fired before the work completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}
