use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use nimbus_forecast_data::{aggregate_forecast, ProviderForecast, RequestScope};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(serde::Deserialize)]
struct WeatherQuery {
    lat: Option<String>,
    lon: Option<String>,
}

/// Validate a decimal coordinate string against an inclusive range.
///
/// The validated string is handed to providers as-is; upstream APIs take the
/// coordinate in its original decimal-string form.
fn validate_coordinate(
    value: Option<String>,
    min: f64,
    max: f64,
    missing: &str,
    invalid: &str,
) -> Result<String, ApiError> {
    let value = value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(missing.to_string()))?;
    match value.parse::<f64>() {
        Ok(parsed) if (min..=max).contains(&parsed) => Ok(value),
        _ => Err(ApiError::BadRequest(invalid.to_string())),
    }
}

/// `GET /weather?lat=..&lon=..` — aggregate the 5-day forecast across all
/// configured providers under one request-wide deadline.
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(q): Query<WeatherQuery>,
) -> ApiResult<Json<ProviderForecast>> {
    let lat = validate_coordinate(q.lat, -90.0, 90.0, "Missing latitude", "Invalid latitude")?;
    let lon = validate_coordinate(q.lon, -180.0, 180.0, "Missing longitude", "Invalid longitude")?;

    let scope = RequestScope::with_timeout(state.api_timeout);
    let data = aggregate_forecast(&scope, &lat, &lon, &state.providers)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to aggregate forecast: {}", e)))?;

    Ok(Json(data))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/weather", get(get_weather))
}
