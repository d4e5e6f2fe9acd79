//! HTTP client for the search backend
//!
//! This module provides the [`SearchBackend`] port used by the click router
//! and its HTTP implementation over the two backend endpoints
//! (`/search/details`, `/search/forecast`), with retry logic, timeouts and
//! typed validation of the JSON responses.

use crate::config::RoutecastConfig;
use crate::error::RoutecastError;
use crate::models::{ForecastSet, RouteSummary};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Port over the search backend's two operations.
///
/// The click router talks to this trait so tests can substitute a canned
/// backend without any network.
#[async_trait]
pub trait SearchBackend {
    /// Request driving directions from an origin address to a place id
    async fn route_details(
        &self,
        origin_address: &str,
        destination_id: &str,
    ) -> Result<RouteSummary>;

    /// Request a weather forecast for a "lat,lon" coordinate string
    async fn forecast(&self, coords: &str) -> Result<ForecastSet>;
}

/// HTTP implementation of [`SearchBackend`]
pub struct SearchApiClient {
    /// HTTP client
    client: Client,
    /// Backend base URL, without trailing slash
    base_url: String,
    /// Maximum number of retries for transient failures
    max_retries: u32,
}

#[derive(Serialize)]
struct DetailsRequest<'a> {
    destination_id: &'a str,
    origin_address: &'a str,
}

#[derive(Serialize)]
struct ForecastRequest<'a> {
    coords: &'a str,
}

impl SearchApiClient {
    /// Create a new client from configuration
    pub fn new(config: &RoutecastConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.backend.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("routecast/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutecastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
            max_retries: config.backend.max_retries,
        })
    }

    /// POST a JSON body with retry and exponential backoff.
    ///
    /// Server errors (5xx) and network failures are retried up to the
    /// configured maximum; client errors are returned immediately.
    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let max_attempts = self.max_retries + 1;
        let mut attempt = 0;

        loop {
            debug!(
                "Issuing backend request to {} (attempt {}/{})",
                url,
                attempt + 1,
                max_attempts
            );

            match self.client.post(&url).json(body).send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return Ok(response);
                    }

                    let retryable =
                        status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
                    if retryable && attempt + 1 < max_attempts {
                        let backoff = Duration::from_millis(500 * 2_u64.pow(attempt));
                        warn!(
                            "Backend returned {} for {}, retrying in {:.1}s",
                            status,
                            path,
                            backoff.as_secs_f64()
                        );
                        tokio::time::sleep(backoff).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(RoutecastError::transport(format!(
                        "Backend returned {status} for {path}"
                    )));
                }
                Err(e) => {
                    if attempt + 1 < max_attempts {
                        let backoff = Duration::from_millis(500 * 2_u64.pow(attempt));
                        warn!(
                            "Network error on attempt {} for {}: {}, retrying in {:.1}s",
                            attempt + 1,
                            path,
                            e,
                            backoff.as_secs_f64()
                        );
                        tokio::time::sleep(backoff).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(RoutecastError::transport(format!(
                        "Request to {path} failed after {max_attempts} attempts: {e}"
                    )));
                }
            }
        }
    }
}

#[async_trait]
impl SearchBackend for SearchApiClient {
    #[instrument(skip(self))]
    async fn route_details(
        &self,
        origin_address: &str,
        destination_id: &str,
    ) -> Result<RouteSummary> {
        info!("Requesting directions to place '{}'", destination_id);
        let start_time = Instant::now();

        let body = DetailsRequest {
            destination_id,
            origin_address,
        };
        let response = self.post_json("/search/details", &body).await?;

        let details: wire::DetailsResponse = response.json().await.map_err(|e| {
            error!("Failed to parse details response: {}", e);
            RoutecastError::invalid_response(format!("Malformed details response: {e}"))
        })?;

        let summary = RouteSummary::try_from(details)?;

        let total_duration = start_time.elapsed();
        info!(
            "Received route with {} steps in {:.3}s",
            summary.steps.len(),
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow details response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(summary)
    }

    #[instrument(skip(self))]
    async fn forecast(&self, coords: &str) -> Result<ForecastSet> {
        info!("Requesting forecast for coordinates '{}'", coords);
        let start_time = Instant::now();

        let body = ForecastRequest { coords };
        let response = self.post_json("/search/forecast", &body).await?;

        let envelope: wire::ForecastResponse = response.json().await.map_err(|e| {
            error!("Failed to parse forecast response: {}", e);
            RoutecastError::invalid_response(format!("Malformed forecast response: {e}"))
        })?;

        let forecast = ForecastSet::try_from(envelope)?;

        let total_duration = start_time.elapsed();
        info!(
            "Received forecast with {} samples in {:.3}s",
            forecast.len(),
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!(
                "Slow forecast response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(forecast)
    }
}

/// Backend response structures and conversion into view models
mod wire {
    use crate::error::RoutecastError;
    use crate::models::{ForecastSample, ForecastSet, RouteStep, RouteSummary};
    use chrono::NaiveDateTime;
    use serde::Deserialize;

    /// Response body of `POST /search/details`
    #[derive(Debug, Deserialize)]
    pub struct DetailsResponse {
        pub routes: Vec<Route>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Route {
        pub legs: Vec<Leg>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Leg {
        pub distance: TextValue,
        pub steps: Vec<Step>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TextValue {
        pub text: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Step {
        pub html_instructions: String,
        pub distance: TextValue,
        pub duration: TextValue,
        pub maneuver: Option<String>,
    }

    /// Response body of `POST /search/forecast`
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub data: ForecastData,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastData {
        pub list: Vec<Sample>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Sample {
        pub dt_txt: String,
        pub clouds: Clouds,
        pub main: Main,
        pub weather: Vec<Weather>,
        pub wind: Wind,
    }

    #[derive(Debug, Deserialize)]
    pub struct Clouds {
        pub all: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct Main {
        pub humidity: u8,
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Weather {
        pub description: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
    }

    impl TryFrom<DetailsResponse> for RouteSummary {
        type Error = RoutecastError;

        fn try_from(response: DetailsResponse) -> Result<Self, Self::Error> {
            let route = response
                .routes
                .into_iter()
                .next()
                .ok_or_else(|| RoutecastError::invalid_response("No routes in response"))?;

            let leg = route
                .legs
                .into_iter()
                .next()
                .ok_or_else(|| RoutecastError::invalid_response("No legs in route"))?;

            let steps = leg
                .steps
                .into_iter()
                .map(|step| RouteStep {
                    instruction: step.html_instructions,
                    distance: step.distance.text,
                    duration: step.duration.text,
                    maneuver: step.maneuver,
                })
                .collect();

            Ok(RouteSummary {
                total_distance: leg.distance.text,
                steps,
            })
        }
    }

    impl TryFrom<Sample> for ForecastSample {
        type Error = RoutecastError;

        fn try_from(sample: Sample) -> Result<Self, Self::Error> {
            let timestamp = NaiveDateTime::parse_from_str(&sample.dt_txt, "%Y-%m-%d %H:%M:%S")
                .map_err(|e| {
                    RoutecastError::invalid_response(format!(
                        "Unparseable forecast timestamp '{}': {e}",
                        sample.dt_txt
                    ))
                })?;

            let description = sample
                .weather
                .into_iter()
                .next()
                .map(|w| w.description)
                .ok_or_else(|| {
                    RoutecastError::invalid_response("Forecast sample has no weather entry")
                })?;

            Ok(ForecastSample {
                timestamp,
                cloud_cover_percent: sample.clouds.all,
                humidity_percent: sample.main.humidity,
                temperature_kelvin: sample.main.temp,
                description,
                wind_speed: sample.wind.speed,
            })
        }
    }

    impl TryFrom<ForecastResponse> for ForecastSet {
        type Error = RoutecastError;

        fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
            let samples = response
                .data
                .list
                .into_iter()
                .map(ForecastSample::try_from)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(ForecastSet { samples })
        }
    }
}
