//! View models for the result panels
//!
//! Everything here is transient: each backend response is validated into
//! these types, rendered once, and dropped.

pub mod forecast;
pub mod route;

pub use forecast::{ForecastSample, ForecastSet};
pub use route::{RouteStep, RouteSummary};
