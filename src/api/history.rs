use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use super::{
    ApiError, AppState, HistoryClearResponse, HistoryListResponse, SearchEntryDto, types::round1,
};
use crate::api::validation::effective_limit;
use crate::entities::searches;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

/// `GET /history` — the newest rows within the limit window, oldest-first,
/// annotated with a relative-time label.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryListResponse>, ApiError> {
    let limit = effective_limit(params.limit);

    let rows = state
        .store
        .recent_searches(limit)
        .await
        .map_err(ApiError::database)?;

    let now = Utc::now();
    let data: Vec<SearchEntryDto> = rows.into_iter().map(|row| entry_dto(row, now)).collect();
    let count = data.len();

    Ok(Json(HistoryListResponse {
        success: true,
        data,
        count,
    }))
}

/// `DELETE /history` — unconditional full clear. Idempotent; a second call
/// reports zero deleted rows.
pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoryClearResponse>, ApiError> {
    let deleted = state
        .store
        .clear_searches()
        .await
        .map_err(ApiError::database)?;

    Ok(Json(HistoryClearResponse {
        success: true,
        message: "Search history cleared".to_string(),
        deleted,
    }))
}

fn entry_dto(row: searches::Model, now: DateTime<Utc>) -> SearchEntryDto {
    let searched_at = DateTime::parse_from_rfc3339(&row.searched_at)
        .map_or(now, |t| t.with_timezone(&Utc));

    SearchEntryDto {
        id: row.id,
        city: row.city_name,
        country: row.country_code,
        temperature: row.temperature.map(round1),
        description: row.weather_description,
        timestamp: searched_at.timestamp(),
        time_ago: time_ago(searched_at, now),
    }
}

/// Relative-time label for a past search: "Just now" under a minute, then
/// minutes, hours, days, and an absolute "Mon D, YYYY" date past a week.
fn time_ago(searched_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(searched_at).num_seconds().max(0);

    if diff < 60 {
        "Just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{mins} minute{} ago", plural(mins))
    } else if diff < 86_400 {
        let hours = diff / 3600;
        format!("{hours} hour{} ago", plural(hours))
    } else if diff < 604_800 {
        let days = diff / 86_400;
        format!("{days} day{} ago", plural(days))
    } else {
        searched_at.format("%b %-d, %Y").to_string()
    }
}

const fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn label(age_seconds: i64) -> String {
        let now = Utc::now();
        time_ago(now - Duration::seconds(age_seconds), now)
    }

    #[test]
    fn test_time_ago_just_now() {
        assert_eq!(label(0), "Just now");
        assert_eq!(label(59), "Just now");
    }

    #[test]
    fn test_time_ago_minutes() {
        assert_eq!(label(60), "1 minute ago");
        assert_eq!(label(125), "2 minutes ago");
        assert_eq!(label(3599), "59 minutes ago");
    }

    #[test]
    fn test_time_ago_hours() {
        assert_eq!(label(3661), "1 hour ago");
        assert_eq!(label(7200), "2 hours ago");
        assert_eq!(label(86_399), "23 hours ago");
    }

    #[test]
    fn test_time_ago_days() {
        assert_eq!(label(86_400), "1 day ago");
        assert_eq!(label(3 * 86_400), "3 days ago");
    }

    #[test]
    fn test_time_ago_absolute_past_a_week() {
        let searched_at = DateTime::parse_from_rfc3339("2026-01-05T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let now = DateTime::parse_from_rfc3339("2026-02-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(time_ago(searched_at, now), "Jan 5, 2026");
    }

    #[test]
    fn test_time_ago_never_negative() {
        let now = Utc::now();
        assert_eq!(time_ago(now + Duration::seconds(30), now), "Just now");
    }
}
