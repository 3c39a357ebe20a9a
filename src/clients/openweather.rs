use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::config::OpenWeatherConfig;

const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum OpenWeatherError {
    /// The upstream reported an internal non-200 code for this query.
    /// Carries the upstream message, first letter capitalized.
    #[error("{0}")]
    NotFound(String),

    #[error("OpenWeatherMap request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected OpenWeatherMap payload: {0}")]
    Payload(String),
}

/// Normalized current-weather reading. Built per request and discarded after
/// the response is sent.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    pub visibility_km: f64,
    pub description: String,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmPayload {
    #[serde(deserialize_with = "de_cod")]
    cod: i64,
    message: Option<String>,
    name: Option<String>,
    sys: Option<OwmSys>,
    main: Option<OwmMain>,
    wind: Option<OwmWind>,
    visibility: Option<f64>,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    humidity: i64,
    pressure: i64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    main: String,
    icon: String,
}

/// OpenWeatherMap sends `cod` as a number on success and a string on error.
fn de_cod<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid cod: {n}"))),
        serde_json::Value::String(s) => s
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid cod: {s}"))),
        other => Err(serde::de::Error::custom(format!("invalid cod: {other}"))),
    }
}

#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(config: &OpenWeatherConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Fetches current weather for `city` in metric units.
    ///
    /// Transport failures and undecodable bodies surface as
    /// [`OpenWeatherError::Transport`] / [`OpenWeatherError::Payload`]; a
    /// well-formed payload whose internal `cod` is not 200 becomes
    /// [`OpenWeatherError::NotFound`].
    pub async fn fetch_current(&self, city: &str) -> Result<WeatherReport, OpenWeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", city), ("appid", &self.api_key), ("units", "metric")])
            .send()
            .await?;

        // The error body (cod/message) is JSON on 404 responses too, so
        // decode before looking at the HTTP status.
        let payload: OwmPayload = response.json().await?;

        if payload.cod != 200 {
            let message = payload
                .message
                .unwrap_or_else(|| "city not found".to_string());
            return Err(OpenWeatherError::NotFound(capitalize(&message)));
        }

        let city_name = payload
            .name
            .ok_or_else(|| OpenWeatherError::Payload("missing city name".to_string()))?;
        let country = payload
            .sys
            .and_then(|s| s.country)
            .ok_or_else(|| OpenWeatherError::Payload("missing country code".to_string()))?;
        let main = payload
            .main
            .ok_or_else(|| OpenWeatherError::Payload("missing main block".to_string()))?;
        let wind = payload
            .wind
            .ok_or_else(|| OpenWeatherError::Payload("missing wind block".to_string()))?;
        let condition = payload
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| OpenWeatherError::Payload("missing weather conditions".to_string()))?;

        Ok(WeatherReport {
            city: city_name,
            country,
            temperature: main.temp,
            feels_like: main.feels_like,
            humidity: main.humidity,
            pressure: main.pressure,
            wind_speed: wind.speed,
            // Upstream reports meters; absent means 0 km, not unknown.
            visibility_km: payload.visibility.map_or(0.0, |m| m / 1000.0),
            description: condition.description,
            condition: condition.main,
            icon: condition.icon,
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
