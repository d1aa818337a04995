//! weather.gov client: point resolution, retrying GETs and period selection.

use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    config::NwsConfig,
    error::FetchError,
    model::{Coordinate, CurrentConditions, ForecastSample, SOURCE_TAG},
    parsing::{parse_timestamp, parse_wind_speed},
};

use self::payload::{ForecastResponse, PointResponse};

pub mod http;
mod payload;

pub use http::ReqwestTransport;

/// Statuses that signal a transient upstream condition.
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Status, `Retry-After` header and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub retry_after: Option<String>,
    pub body: String,
}

/// A single GET against the upstream service, with no retry logic.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// Where to fetch hourly data for a point, plus its human label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEndpoint {
    pub hourly_url: Url,
    pub location: Option<String>,
}

/// Seconds to wait before retry number `attempt + 1`: a numeric
/// `Retry-After` if the server sent one, else `2^attempt`.
pub fn retry_delay(retry_after: Option<&str>, attempt: u32) -> Duration {
    let hinted = retry_after
        .map(str::trim)
        .filter(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|value| value.parse::<u64>().ok());

    Duration::from_secs(hinted.unwrap_or_else(|| 2u64.saturating_pow(attempt)))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    max_attempts: u32,
}

impl ForecastClient {
    /// Build a client with a reqwest transport configured from `config`.
    pub fn from_config(config: &NwsConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(
            &config.user_agent(),
            Duration::from_secs(config.timeout_secs),
        )?;

        Self::with_transport(Arc::new(transport), &config.base_url, config.max_attempts)
    }

    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        base_url: &str,
        max_attempts: u32,
    ) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|err| FetchError::Network {
            url: base_url.to_string(),
            message: format!("invalid base URL: {err}"),
        })?;

        Ok(Self {
            transport,
            base_url,
            max_attempts: max_attempts.max(1),
        })
    }

    fn join(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url.join(path).map_err(|err| FetchError::Network {
            url: path.to_string(),
            message: format!("cannot join onto {}: {err}", self.base_url),
        })
    }

    /// GET `url` and decode its JSON body, retrying transient statuses.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut last_status = 0;

        for attempt in 1..=self.max_attempts {
            let response = self.transport.get(url).await?;

            if RETRYABLE_STATUS_CODES.contains(&response.status) {
                last_status = response.status;
                if attempt == self.max_attempts {
                    break;
                }

                let delay = retry_delay(response.retry_after.as_deref(), attempt);
                warn!(
                    url,
                    status = response.status,
                    attempt,
                    delay_secs = delay.as_secs(),
                    "retryable status, backing off"
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if !(200..300).contains(&response.status) {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: response.status,
                    body: truncate_body(&response.body),
                });
            }

            return serde_json::from_str(&response.body).map_err(|source| FetchError::Malformed {
                url: url.to_string(),
                source,
            });
        }

        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.max_attempts,
            last_status,
        })
    }

    /// Resolve the hourly forecast URL for a point via `/points/{lat},{lon}`.
    pub async fn resolve_endpoint(&self, coordinate: Coordinate) -> Result<ForecastEndpoint, FetchError> {
        let points_url = self.join(&format!(
            "points/{:.4},{:.4}",
            coordinate.latitude(),
            coordinate.longitude()
        ))?;
        debug!(%points_url, "resolving forecast endpoint");

        let point: PointResponse = self.get_json(points_url.as_str()).await?;
        let properties = point.properties;

        let hourly = properties
            .forecast_hourly
            .clone()
            .filter(|url| !url.trim().is_empty());
        let path = match hourly {
            Some(url) => url,
            None => properties.grid_path().ok_or_else(|| FetchError::MissingEndpoint {
                url: points_url.to_string(),
            })?,
        };

        Ok(ForecastEndpoint {
            hourly_url: self.join(&path)?,
            location: properties.city_state(),
        })
    }

    /// Conditions for the first (current or next-hour) forecast period.
    pub async fn current_conditions(&self, coordinate: Coordinate) -> Result<CurrentConditions, FetchError> {
        let endpoint = self.resolve_endpoint(coordinate).await?;
        let forecast: ForecastResponse = self.get_json(endpoint.hourly_url.as_str()).await?;

        let period = forecast
            .properties
            .periods
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::NoData {
                url: endpoint.hourly_url.to_string(),
            })?;

        let period_start = period.start_time.as_deref().map(parse_timestamp).transpose()?;

        Ok(CurrentConditions {
            temp_f: period.temperature,
            wind_mph: period.wind_speed.as_deref().map(parse_wind_speed).unwrap_or(0.0),
            short_forecast: period.short_forecast,
            period_start,
            location: endpoint.location.unwrap_or_else(|| coordinate.to_string()),
            source: SOURCE_TAG.to_string(),
        })
    }

    /// `"City, ST"` for the point, or `None` on any failure.
    pub async fn location_label(&self, coordinate: Coordinate) -> Option<String> {
        match self.resolve_endpoint(coordinate).await {
            Ok(endpoint) => endpoint.location,
            Err(err) => {
                debug!(%coordinate, error = %err, "no location label");
                None
            }
        }
    }

    /// The first period's short forecast, or `None` on any failure.
    pub async fn short_forecast(&self, coordinate: Coordinate) -> Option<String> {
        self.try_short_forecast(coordinate).await.unwrap_or_else(|err| {
            debug!(%coordinate, error = %err, "no short forecast");
            None
        })
    }

    async fn try_short_forecast(&self, coordinate: Coordinate) -> Result<Option<String>, FetchError> {
        let endpoint = self.resolve_endpoint(coordinate).await?;
        if !endpoint.hourly_url.path().ends_with("/forecast/hourly") {
            return Ok(None);
        }

        let forecast: ForecastResponse = self.get_json(endpoint.hourly_url.as_str()).await?;

        Ok(forecast
            .properties
            .periods
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|period| period.short_forecast)
            .filter(|text| !text.trim().is_empty()))
    }

    /// Collect up to `target` short forecasts from `points`, trying at most
    /// four points per wanted sample and pausing between attempts.
    pub async fn sample_short_forecasts<I>(
        &self,
        points: I,
        target: usize,
        pause: Duration,
    ) -> Vec<ForecastSample>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut samples = Vec::with_capacity(target);

        for coordinate in points.into_iter().take(target.saturating_mul(4)) {
            if samples.len() >= target {
                break;
            }

            match self.short_forecast(coordinate).await {
                Some(short_forecast) => {
                    info!(
                        progress = %format!("{}/{}", samples.len() + 1, target),
                        %coordinate,
                        %short_forecast,
                        "sampled"
                    );
                    samples.push(ForecastSample {
                        latitude: coordinate.latitude(),
                        longitude: coordinate.longitude(),
                        short_forecast,
                    });
                }
                None => info!(%coordinate, "skip: no usable forecast"),
            }

            if !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        samples
    }
}
