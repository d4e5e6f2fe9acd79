//! Click routing for the search results list
//!
//! Translates clicks on result items into typed backend requests and routes
//! the validated responses to the matching panel renderer. A failed request
//! surfaces as an inline panel error and never clears previously rendered
//! content; unrecognized triggers are ignored entirely.
//!
//! Responses are applied through per-panel request tokens: only the newest
//! outstanding request for a panel may render into it, so rapid repeated
//! clicks keep last-request-wins ordering even when responses arrive out of
//! order.

use crate::api::SearchBackend;
use crate::error::RoutecastError;
use crate::render;
use crate::view::TextPanel;
use crate::Result;
use tracing::{debug, info, warn};

/// What kind of trigger element was clicked, derived from its class marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The "directions" button of a result item
    Directions,
    /// The "forecast" button of a result item
    Forecast,
    /// Anything else; ignored by the router
    Other(String),
}

impl Trigger {
    /// Map a class marker to a trigger kind
    #[must_use]
    pub fn from_class_marker(marker: &str) -> Self {
        match marker {
            "directions-button" => Self::Directions,
            "forecast-button" => Self::Forecast,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The result item enclosing the clicked trigger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultItem {
    /// Place identifier carried by the item
    pub place_id: Option<String>,
    /// "lat,lon" coordinate string carried by the item's data attribute
    pub coords: Option<String>,
}

/// A click inside the results container, already lifted out of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub trigger: Trigger,
    pub item: ResultItem,
}

/// The two result panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Directions,
    Forecast,
}

/// Token identifying one outstanding request against a panel.
///
/// Issued by [`PageController::begin_request`]; a response is applied only
/// while its token is still the newest for that panel.
#[derive(Debug, Clone, Copy)]
pub struct RequestToken {
    panel: PanelKind,
    seq: u64,
}

/// Outcome of handling a click or applying a response
#[derive(Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The response was rendered into the panel
    Rendered(PanelKind),
    /// The request failed; an inline error was shown in the panel
    Failed(PanelKind),
    /// The response was superseded by a newer request and discarded
    Stale(PanelKind),
    /// The click did not hit a recognized trigger
    Ignored,
}

/// Controller owning the result panels and the origin address of the page
pub struct PageController<B: SearchBackend> {
    backend: B,
    origin_address: String,
    directions_panel: TextPanel,
    forecast_panel: TextPanel,
    directions_seq: u64,
    forecast_seq: u64,
}

impl<B: SearchBackend> PageController<B> {
    /// Create a controller for a results page.
    ///
    /// `origin_address` is the search origin shown in the page heading; it
    /// is read once and reused for every directions request.
    pub fn new(backend: B, origin_address: impl Into<String>) -> Self {
        Self {
            backend,
            origin_address: origin_address.into(),
            directions_panel: TextPanel::new(),
            forecast_panel: TextPanel::new(),
            directions_seq: 0,
            forecast_seq: 0,
        }
    }

    /// The directions panel, as last rendered
    #[must_use]
    pub fn directions_panel(&self) -> &TextPanel {
        &self.directions_panel
    }

    /// The forecast panel, as last rendered
    #[must_use]
    pub fn forecast_panel(&self) -> &TextPanel {
        &self.forecast_panel
    }

    /// Handle one click event end to end: issue the request, await the
    /// response and render it. Returns what happened; request failures are
    /// reported in-panel and never propagate as errors.
    pub async fn handle_click(&mut self, event: ClickEvent) -> ClickOutcome {
        match event.trigger {
            Trigger::Directions => {
                let token = self.begin_request(PanelKind::Directions);
                let result = match require_place_id(&event.item) {
                    Ok(place_id) => {
                        info!("Directions requested for place '{}'", place_id);
                        self.backend
                            .route_details(&self.origin_address, &place_id)
                            .await
                    }
                    Err(e) => Err(e),
                };
                self.apply_directions(token, result)
            }
            Trigger::Forecast => {
                let token = self.begin_request(PanelKind::Forecast);
                let result = match require_coords(&event.item) {
                    Ok(coords) => {
                        info!("Forecast requested for coordinates '{}'", coords);
                        self.backend.forecast(&coords).await
                    }
                    Err(e) => Err(e),
                };
                self.apply_forecast(token, result)
            }
            Trigger::Other(marker) => {
                debug!("Ignoring click on unrecognized trigger '{}'", marker);
                ClickOutcome::Ignored
            }
        }
    }

    /// Start a request against a panel, superseding any outstanding one
    pub fn begin_request(&mut self, panel: PanelKind) -> RequestToken {
        let seq = match panel {
            PanelKind::Directions => {
                self.directions_seq += 1;
                self.directions_seq
            }
            PanelKind::Forecast => {
                self.forecast_seq += 1;
                self.forecast_seq
            }
        };
        RequestToken { panel, seq }
    }

    /// Apply a directions response for the given token
    pub fn apply_directions(
        &mut self,
        token: RequestToken,
        result: Result<crate::models::RouteSummary>,
    ) -> ClickOutcome {
        debug_assert!(token.panel == PanelKind::Directions);
        if !self.is_current(token) {
            debug!("Discarding stale directions response (token {})", token.seq);
            return ClickOutcome::Stale(PanelKind::Directions);
        }

        match result {
            Ok(summary) => {
                render::render_directions(&mut self.directions_panel, &summary);
                ClickOutcome::Rendered(PanelKind::Directions)
            }
            Err(e) => {
                warn!("Directions request failed: {}", e);
                render::render_failure(&mut self.directions_panel, &e.user_message());
                ClickOutcome::Failed(PanelKind::Directions)
            }
        }
    }

    /// Apply a forecast response for the given token
    pub fn apply_forecast(
        &mut self,
        token: RequestToken,
        result: Result<crate::models::ForecastSet>,
    ) -> ClickOutcome {
        debug_assert!(token.panel == PanelKind::Forecast);
        if !self.is_current(token) {
            debug!("Discarding stale forecast response (token {})", token.seq);
            return ClickOutcome::Stale(PanelKind::Forecast);
        }

        match result {
            Ok(forecast) => {
                render::render_forecast(&mut self.forecast_panel, &forecast);
                ClickOutcome::Rendered(PanelKind::Forecast)
            }
            Err(e) => {
                warn!("Forecast request failed: {}", e);
                render::render_failure(&mut self.forecast_panel, &e.user_message());
                ClickOutcome::Failed(PanelKind::Forecast)
            }
        }
    }

    fn is_current(&self, token: RequestToken) -> bool {
        let newest = match token.panel {
            PanelKind::Directions => self.directions_seq,
            PanelKind::Forecast => self.forecast_seq,
        };
        token.seq == newest
    }
}

fn require_place_id(item: &ResultItem) -> Result<String> {
    match item.place_id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(RoutecastError::validation("result item has no place id")),
    }
}

fn require_coords(item: &ResultItem) -> Result<String> {
    let coords = item
        .coords
        .as_deref()
        .ok_or_else(|| RoutecastError::validation("result item has no coordinates"))?;
    parse_coords(coords)?;
    Ok(coords.to_string())
}

/// Parse and validate a coordinate string like "42.3293,-71.3524".
///
/// The string itself is what gets forwarded to the backend; parsing only
/// guards against sending garbage.
pub fn parse_coords(input: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    if parts.len() != 2 {
        return Err(RoutecastError::validation(
            "Coordinates must be in format 'lat,lon'",
        ));
    }

    let lat = parts[0]
        .parse::<f64>()
        .map_err(|_| RoutecastError::validation(format!("Invalid latitude: {}", parts[0])))?;
    let lon = parts[1]
        .parse::<f64>()
        .map_err(|_| RoutecastError::validation(format!("Invalid longitude: {}", parts[1])))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(RoutecastError::validation(format!(
            "Latitude must be between -90 and 90, got: {lat}"
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(RoutecastError::validation(format!(
            "Longitude must be between -180 and 180, got: {lon}"
        )));
    }

    Ok((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastSample, ForecastSet, RouteStep, RouteSummary};
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned backend that counts how many requests it served
    #[derive(Default)]
    struct StubBackend {
        calls: AtomicUsize,
    }

    impl StubBackend {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchBackend for StubBackend {
        async fn route_details(
            &self,
            _origin_address: &str,
            destination_id: &str,
        ) -> Result<RouteSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RouteSummary {
                total_distance: "2.3 km".to_string(),
                steps: vec![RouteStep {
                    instruction: format!("Drive to {destination_id}"),
                    distance: "2.3 km".to_string(),
                    duration: "6 mins".to_string(),
                    maneuver: None,
                }],
            })
        }

        async fn forecast(&self, coords: &str) -> Result<ForecastSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ForecastSet {
                samples: vec![ForecastSample {
                    timestamp: NaiveDateTime::parse_from_str(
                        "2024-03-01 14:30:00",
                        "%Y-%m-%d %H:%M:%S",
                    )
                    .unwrap(),
                    cloud_cover_percent: 40,
                    humidity_percent: 60,
                    temperature_kelvin: 300.15,
                    description: format!("forecast for {coords}"),
                    wind_speed: 4.6,
                }],
            })
        }
    }

    fn item() -> ResultItem {
        ResultItem {
            place_id: Some("ChIJabc123".to_string()),
            coords: Some("42.3293,-71.3524".to_string()),
        }
    }

    #[test]
    fn test_trigger_from_class_marker() {
        assert_eq!(
            Trigger::from_class_marker("directions-button"),
            Trigger::Directions
        );
        assert_eq!(
            Trigger::from_class_marker("forecast-button"),
            Trigger::Forecast
        );
        assert_eq!(
            Trigger::from_class_marker("result-title"),
            Trigger::Other("result-title".to_string())
        );
    }

    #[tokio::test]
    async fn test_unrecognized_trigger_is_ignored() {
        let mut controller = PageController::new(StubBackend::default(), "1 Main St");

        let outcome = controller
            .handle_click(ClickEvent {
                trigger: Trigger::Other("result-title".to_string()),
                item: item(),
            })
            .await;

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(controller.backend.call_count(), 0);
        assert!(!controller.directions_panel().is_visible());
        assert!(!controller.forecast_panel().is_visible());
    }

    #[tokio::test]
    async fn test_directions_click_renders_panel() {
        let mut controller = PageController::new(StubBackend::default(), "1 Main St");

        let outcome = controller
            .handle_click(ClickEvent {
                trigger: Trigger::Directions,
                item: item(),
            })
            .await;

        assert_eq!(outcome, ClickOutcome::Rendered(PanelKind::Directions));
        assert_eq!(controller.backend.call_count(), 1);
        let text = controller.directions_panel().to_text();
        assert!(text.contains("Total Distance: 2.3 km"));
        assert!(text.contains("Drive to ChIJabc123"));
        assert!(controller.directions_panel().is_visible());
        // The forecast panel is untouched
        assert!(!controller.forecast_panel().is_visible());
    }

    #[tokio::test]
    async fn test_forecast_click_renders_panel() {
        let mut controller = PageController::new(StubBackend::default(), "1 Main St");

        let outcome = controller
            .handle_click(ClickEvent {
                trigger: Trigger::Forecast,
                item: item(),
            })
            .await;

        assert_eq!(outcome, ClickOutcome::Rendered(PanelKind::Forecast));
        let text = controller.forecast_panel().to_text();
        assert!(text.contains("Weather Forecast"));
        assert!(text.contains("forecast for 42.3293,-71.3524"));
    }

    #[tokio::test]
    async fn test_missing_place_id_fails_without_request() {
        let mut controller = PageController::new(StubBackend::default(), "1 Main St");

        let outcome = controller
            .handle_click(ClickEvent {
                trigger: Trigger::Directions,
                item: ResultItem::default(),
            })
            .await;

        assert_eq!(outcome, ClickOutcome::Failed(PanelKind::Directions));
        assert_eq!(controller.backend.call_count(), 0);
        let error = controller.directions_panel().error().unwrap();
        assert!(error.contains("place id"));
    }

    #[tokio::test]
    async fn test_invalid_coords_fail_without_request() {
        let mut controller = PageController::new(StubBackend::default(), "1 Main St");

        let outcome = controller
            .handle_click(ClickEvent {
                trigger: Trigger::Forecast,
                item: ResultItem {
                    place_id: None,
                    coords: Some("91.0,8.0".to_string()),
                },
            })
            .await;

        assert_eq!(outcome, ClickOutcome::Failed(PanelKind::Forecast));
        assert_eq!(controller.backend.call_count(), 0);
        assert!(controller.forecast_panel().error().is_some());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mut controller = PageController::new(StubBackend::default(), "1 Main St");

        // Two requests race on the forecast panel; the older response must
        // not land after the newer one was issued.
        let first = controller.begin_request(PanelKind::Forecast);
        let second = controller.begin_request(PanelKind::Forecast);

        let stale = controller.backend.forecast("1.0,1.0").await;
        let outcome = controller.apply_forecast(first, stale);
        assert_eq!(outcome, ClickOutcome::Stale(PanelKind::Forecast));
        assert!(!controller.forecast_panel().is_visible());

        let fresh = controller.backend.forecast("2.0,2.0").await;
        let outcome = controller.apply_forecast(second, fresh);
        assert_eq!(outcome, ClickOutcome::Rendered(PanelKind::Forecast));
        assert!(
            controller
                .forecast_panel()
                .to_text()
                .contains("forecast for 2.0,2.0")
        );
    }

    #[tokio::test]
    async fn test_second_click_replaces_first_render() {
        let mut controller = PageController::new(StubBackend::default(), "1 Main St");

        controller
            .handle_click(ClickEvent {
                trigger: Trigger::Forecast,
                item: ResultItem {
                    place_id: None,
                    coords: Some("1.0,1.0".to_string()),
                },
            })
            .await;
        controller
            .handle_click(ClickEvent {
                trigger: Trigger::Forecast,
                item: ResultItem {
                    place_id: None,
                    coords: Some("2.0,2.0".to_string()),
                },
            })
            .await;

        let text = controller.forecast_panel().to_text();
        assert!(text.contains("forecast for 2.0,2.0"));
        assert!(!text.contains("forecast for 1.0,1.0"));
    }

    #[test]
    fn test_parse_coords_valid() {
        assert_eq!(
            parse_coords("42.3293,-71.3524").unwrap(),
            (42.3293, -71.3524)
        );
        assert_eq!(parse_coords("42.3293 -71.3524").unwrap(), (42.3293, -71.3524));
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(parse_coords("42.3293").is_err());
        assert!(parse_coords("91.0,8.0").is_err());
        assert!(parse_coords("46.0,-181.0").is_err());
        assert!(parse_coords("north,west").is_err());
    }
}
