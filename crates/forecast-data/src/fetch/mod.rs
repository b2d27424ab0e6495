//! Day-fetch fan-out engine.
//!
//! Produces one [`ForecastDay`] for one provider: a burst of
//! [`FETCH_DAYS_COUNT`] concurrent day-tasks over the lookahead window,
//! joined and merged under the request's shared [`RequestScope`].

use chrono::{Days, NaiveDate, Utc};
use futures::future::join_all;
use log::{debug, warn};

use crate::errors::ForecastError;
use crate::models::{ForecastData, ForecastDay, FETCH_DAYS_COUNT};
use crate::provider::WeatherProvider;
use crate::scope::RequestScope;

/// Outcome of one day-task: the date it targeted and what it recorded.
/// `None` means the task observed cancellation before dispatch and recorded
/// nothing for that date.
type DayOutcome = (NaiveDate, Option<Result<f64, ForecastError>>);

/// Fetch the provider's forecast for today through today + 4.
///
/// All day-fetches run concurrently; the call returns only after every one
/// of them has completed, failed, or exited early on cancellation. The merge
/// drains results in ascending date order, so when several days fail the
/// lowest date's error wins deterministically.
///
/// A scope that is already cancelled when the engine starts yields an
/// **empty** map with no error: the day-tasks record nothing, so the merge
/// finds nothing to fail on. This "nothing happened" success is a deliberate
/// policy choice; callers that must distinguish it can ask the scope.
pub async fn fetch_forecast_days(
    provider: &dyn WeatherProvider,
    scope: &RequestScope,
    lat: &str,
    lon: &str,
) -> Result<ForecastDay, ForecastError> {
    fetch_window(provider, scope, lat, lon, Utc::now().date_naive()).await
}

/// Fan out over `start .. start + FETCH_DAYS_COUNT` and merge the results.
async fn fetch_window(
    provider: &dyn WeatherProvider,
    scope: &RequestScope,
    lat: &str,
    lon: &str,
    start: NaiveDate,
) -> Result<ForecastDay, ForecastError> {
    debug!(
        "fetching {} days from {} for ({}, {})",
        FETCH_DAYS_COUNT,
        provider.name(),
        lat,
        lon
    );

    let tasks = (0..FETCH_DAYS_COUNT).map(|i| {
        let date = start + Days::new(i as u64);
        async move { (date, provider.fetch_day(scope, date, lat, lon).await) }
    });

    // The awaited task set doubles as the per-request result store: created
    // here, drained by the merge, discarded after.
    let outcomes = join_all(tasks).await;
    merge_outcomes(provider.name(), outcomes)
}

/// Drain day-task outcomes into a ForecastDay, first error wins.
///
/// Entries are visited in ascending date order. Unrecorded entries (task
/// cancelled before dispatch) are skipped; a non-finite temperature is a
/// contract violation by the provider and aborts with a synthesized error.
fn merge_outcomes(
    provider_name: &str,
    mut outcomes: Vec<DayOutcome>,
) -> Result<ForecastDay, ForecastError> {
    outcomes.sort_by_key(|(date, _)| *date);

    let mut forecast = ForecastDay::new();
    for (date, outcome) in outcomes {
        match outcome {
            // Cancelled before dispatch: nothing was recorded for this date.
            None => continue,
            Some(Ok(temperature)) if !temperature.is_finite() => {
                warn!(
                    "{} recorded a non-finite temperature for {}",
                    provider_name, date
                );
                return Err(ForecastError::UnknownResult);
            }
            Some(Ok(temperature)) => {
                forecast.insert(
                    date.format("%Y-%m-%d").to_string(),
                    ForecastData { temperature },
                );
            }
            Some(Err(err)) => {
                warn!("{} failed for {}: {}", provider_name, date, err);
                return Err(err);
            }
        }
    }
    Ok(forecast)
}
