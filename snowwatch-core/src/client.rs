//! HTTP client for the current-conditions endpoint.
//!
//! One GET per fetch, no retries. Every call resolves to a classification or
//! exactly one [`FetchError`] kind; nothing is silently dropped.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::verdict::Classification;

/// Default service base, overridable through configuration.
pub const DEFAULT_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`OpenWeatherClient`].
///
/// The base URL and key are configuration values, never source literals;
/// the binary fills them in from flags or environment variables.
#[derive(Clone, Debug)]
pub struct WeatherConfig {
    /// Service base URL, joined with `/weather` for the conditions endpoint.
    pub api_base: String,
    /// API key sent as the `appid` query parameter.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl WeatherConfig {
    /// Configuration pointing at the default OpenWeatherMap base.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Why a fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not complete: connect failure, timeout, or a broken
    /// transfer. Always constructed with the URL stripped; transport errors
    /// embed the request URL, and the URL carries the API key.
    #[error("network failure: {0}")]
    Network(reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("weather service returned {0}")]
    Http(StatusCode),

    /// The body was not the JSON shape the endpoint documents.
    #[error("malformed weather response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A well-formed response carrying no weather entries at all.
    #[error("weather report was empty")]
    EmptyReport,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Http(_) => FetchErrorKind::Http,
            FetchError::Parse(_) => FetchErrorKind::Parse,
            FetchError::EmptyReport => FetchErrorKind::EmptyReport,
        }
    }

    /// Flatten into the `Clone`-able form carried by actions and state.
    pub fn to_failure(&self) -> FetchFailure {
        FetchFailure {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// The four failure categories a fetch can resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Http,
    Parse,
    EmptyReport,
}

impl FetchErrorKind {
    /// Short label for status lines and logs.
    pub fn label(self) -> &'static str {
        match self {
            FetchErrorKind::Network => "network failure",
            FetchErrorKind::Http => "http error",
            FetchErrorKind::Parse => "parse error",
            FetchErrorKind::EmptyReport => "empty report",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A failed fetch as recorded on state and surfaced in the status line.
///
/// [`FetchError`] wraps reqwest/serde errors and is not `Clone`, so results
/// travel through the action channel in this flattened form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Deserialize)]
struct ConditionsResponse {
    // Absent and empty both mean "no report", handled by the caller.
    #[serde(default)]
    weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    main: String,
}

/// Thin client for the OpenWeatherMap current-conditions endpoint.
#[derive(Clone, Debug)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    /// Build a client with the configured timeout applied to every request.
    pub fn new(config: WeatherConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::Network)?;
        Ok(Self { http, config })
    }

    fn conditions_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}/weather?lat={}&lon={}&appid={}",
            self.config.api_base.trim_end_matches('/'),
            lat,
            lon,
            self.config.api_key
        )
    }

    /// Fetch the current classification for the given coordinates.
    ///
    /// Reads `weather[0].main` out of the response. A 2xx body whose
    /// `weather` array is empty or absent is [`FetchError::EmptyReport`];
    /// undecodable JSON is [`FetchError::Parse`].
    ///
    /// The URL carries the API key, so only coordinates are ever logged and
    /// transport errors lose their URL before leaving the client.
    pub async fn fetch_classification(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Classification, FetchError> {
        debug!(lat, lon, "requesting current conditions");

        let response = self
            .http
            .get(self.conditions_url(lat, lon))
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status));
        }

        // Read the body before decoding so transport errors stay Network
        // and decode errors stay Parse.
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url()))?;
        let report: ConditionsResponse = serde_json::from_str(&body)?;

        report
            .weather
            .into_iter()
            .next()
            .map(|entry| Classification::new(entry.main))
            .ok_or(FetchError::EmptyReport)
    }
}
