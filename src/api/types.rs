use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Current-weather payload returned by `POST /weather`. Decimal fields are
/// rounded to 1 dp here only; stored history keeps the raw values.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDto {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    pub visibility: f64,
    pub description: String,
    pub weather_main: String,
    pub icon: String,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryDto {
    pub id: i32,
    pub city: String,
    pub country: String,
    pub temperature: Option<f64>,
    pub description: String,
    pub timestamp: i64,
    pub time_ago: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryListResponse {
    pub success: bool,
    pub data: Vec<SearchEntryDto>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryClearResponse {
    pub success: bool,
    pub message: String,
    pub deleted: u64,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
