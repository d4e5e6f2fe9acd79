//! `routecast` - Result panels for a location search page
//!
//! This library turns clicks on a list of nearby places into backend
//! requests for driving directions or weather forecasts, and renders the
//! validated responses as text blocks into hidden-until-first-render panels.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod router;
pub mod view;

// Re-export core types for public API
pub use api::{SearchApiClient, SearchBackend};
pub use config::RoutecastConfig;
pub use error::RoutecastError;
pub use models::{ForecastSample, ForecastSet, RouteStep, RouteSummary};
pub use router::{ClickEvent, ClickOutcome, PageController, PanelKind, ResultItem, Trigger};
pub use view::{Block, RenderTarget, TextPanel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RoutecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
