use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::openweather::OpenWeatherClient;
use crate::config::Config;
use crate::db::Store;

mod error;
mod history;
mod types;
mod validation;
mod weather;

pub use error::ApiError;
pub use types::*;

pub struct AppState {
    pub store: Store,
    pub weather: OpenWeatherClient,
}

pub async fn create_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let weather = OpenWeatherClient::new(&config.openweather)?;

    Ok(Arc::new(AppState { store, weather }))
}

pub fn router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route(
            "/weather",
            post(weather::fetch_weather).fallback(method_not_allowed),
        )
        .route(
            "/history",
            get(history::get_history)
                .delete(history::clear_history)
                .fallback(method_not_allowed),
        )
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Unrouted methods on a known path get the JSON error envelope instead of
// axum's bare 405.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
