//! Driving route view models

use serde::{Deserialize, Serialize};

/// A single step of a driving route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Instruction text; may contain simple HTML-style markup
    pub instruction: String,
    /// Step distance, preformatted by the directions provider ("0.3 km")
    pub distance: String,
    /// Step duration, preformatted by the directions provider ("2 mins")
    pub duration: String,
    /// Maneuver hint ("turn-left"). The first and last steps commonly
    /// have none; absence is not an error.
    pub maneuver: Option<String>,
}

impl RouteStep {
    /// Instruction with markup stripped, for plain-text display
    #[must_use]
    pub fn instruction_text(&self) -> String {
        strip_markup(&self.instruction)
    }
}

/// A full route: total distance plus the ordered steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Total route distance, preformatted ("2.3 km")
    pub total_distance: String,
    /// Route steps in driving order; may be empty
    pub steps: Vec<RouteStep>,
}

/// Remove simple HTML-style tags and decode the entities the directions
/// provider emits inside instruction text.
fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out.replace("&nbsp;", " ").replace("&amp;", "&")
}
