use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, ApiResponse, AppState, WeatherDto, types::round1};
use crate::api::validation::validate_city;

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub city: String,
}

/// `POST /weather` — validate, fetch upstream, log the search, respond.
pub async fn fetch_weather(
    State(state): State<Arc<AppState>>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<ApiResponse<WeatherDto>>, ApiError> {
    let city = validate_city(&request.city)?;

    let report = state.weather.fetch_current(city).await?;

    // History is best-effort: a failed write must not deny the caller a
    // successful lookup.
    if let Err(e) = state
        .store
        .record_search(
            &report.city,
            &report.country,
            Some(report.temperature),
            &report.description,
        )
        .await
    {
        warn!("Failed to record search for {}: {:#}", report.city, e);
    }

    Ok(Json(ApiResponse::success(WeatherDto {
        city: report.city,
        country: report.country,
        temperature: round1(report.temperature),
        feels_like: round1(report.feels_like),
        humidity: report.humidity,
        pressure: report.pressure,
        wind_speed: round1(report.wind_speed),
        visibility: round1(report.visibility_km),
        description: report.description,
        weather_main: report.condition,
        icon: report.icon,
        timestamp: chrono::Utc::now().timestamp(),
    })))
}
