//! Stateless renderers for the directions and forecast panels
//!
//! Each render fully replaces the target panel's content and reveals the
//! panel afterwards, so repeating a render with the same input yields the
//! same panel state.

use crate::models::{ForecastSet, RouteSummary};
use crate::view::{Block, RenderTarget};

const DIRECTIONS_HEADING: &str = "Driving Directions";
const FORECAST_HEADING: &str = "Weather Forecast";

/// Render a route into the directions panel.
///
/// Shows the heading and total distance, then one entry per step with a
/// separator between consecutive steps. The maneuver line is emitted exactly
/// when the step carries one; missing maneuvers are a normal state, not an
/// error. An empty route renders only the heading and total distance.
pub fn render_directions<T: RenderTarget>(target: &mut T, summary: &RouteSummary) {
    target.clear();
    target.set_error(None);

    target.push(Block::Heading(DIRECTIONS_HEADING.to_string()));
    target.push(Block::labeled("Total Distance", &summary.total_distance));

    for (i, step) in summary.steps.iter().enumerate() {
        if i > 0 {
            target.push(Block::Separator);
        }

        target.push(Block::Text(step.instruction_text()));
        target.push(Block::labeled("Distance", &step.distance));
        target.push(Block::labeled("Estimated Time", &step.duration));

        if let Some(maneuver) = &step.maneuver {
            target.push(Block::labeled("Maneuver", maneuver));
        }
    }

    target.reveal();
}

/// Render a forecast into the forecast panel.
///
/// Shows the heading, then one entry per sample in chronological order with
/// a separator between consecutive samples. Temperature is converted to
/// Fahrenheit for display; cloud cover, humidity and wind speed pass through
/// unmodified. An empty forecast renders only the heading.
pub fn render_forecast<T: RenderTarget>(target: &mut T, forecast: &ForecastSet) {
    target.clear();
    target.set_error(None);

    target.push(Block::Heading(FORECAST_HEADING.to_string()));

    for (i, sample) in forecast.samples.iter().enumerate() {
        if i > 0 {
            target.push(Block::Separator);
        }

        target.push(Block::labeled(
            "Date",
            format!("{} {}", sample.date_display(), sample.time_display()),
        ));
        target.push(Block::labeled(
            "Cloud Cover (%)",
            sample.cloud_cover_percent.to_string(),
        ));
        target.push(Block::labeled(
            "Humidity (%)",
            sample.humidity_percent.to_string(),
        ));
        target.push(Block::labeled(
            "Temperature (F)",
            sample.temperature_fahrenheit().to_string(),
        ));
        target.push(Block::labeled("Weather", &sample.description));
        target.push(Block::labeled(
            "Windspeed (mph)",
            sample.wind_speed.to_string(),
        ));
    }

    target.reveal();
}

/// Surface a request failure in a panel.
///
/// Sets the inline error and reveals the panel without clearing it, so any
/// previously rendered content stays visible.
pub fn render_failure<T: RenderTarget>(target: &mut T, message: &str) {
    target.set_error(Some(message.to_string()));
    target.reveal();
}
