//! Weather forecast view models and display conversions

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One forecast sample as delivered by the weather provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Sample timestamp, parsed at the boundary from "YYYY-MM-DD HH:MM:SS"
    pub timestamp: NaiveDateTime,
    /// Cloud cover percentage (0-100)
    pub cloud_cover_percent: u8,
    /// Relative humidity percentage (0-100)
    pub humidity_percent: u8,
    /// Temperature in Kelvin, as the provider reports it
    pub temperature_kelvin: f64,
    /// Human-readable description of conditions
    pub description: String,
    /// Wind speed, passed through unmodified
    pub wind_speed: f64,
}

impl ForecastSample {
    /// Temperature converted for display, rounded to the nearest degree
    #[must_use]
    pub fn temperature_fahrenheit(&self) -> i64 {
        kelvin_to_fahrenheit(self.temperature_kelvin)
    }

    /// Date part of the timestamp ("2024-03-01")
    #[must_use]
    pub fn date_display(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    /// Time part of the timestamp in 12-hour form ("2:30 PM")
    #[must_use]
    pub fn time_display(&self) -> String {
        format_12_hour(self.timestamp.time())
    }
}

/// An ordered, chronological set of forecast samples
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    /// Samples in chronological order; may be empty
    pub samples: Vec<ForecastSample>,
}

impl ForecastSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Convert Kelvin to Fahrenheit for display: `round((K - 273.15) * 1.8 + 32)`,
/// ties rounded away from zero.
#[must_use]
pub fn kelvin_to_fahrenheit(kelvin: f64) -> i64 {
    ((kelvin - 273.15) * 1.8 + 32.0).round() as i64
}

/// Format a time of day in 12-hour form with meridiem ("2:30 PM")
#[must_use]
pub fn format_12_hour(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    let meridiem = if is_pm { "PM" } else { "AM" };
    format!("{}:{:02} {}", hour, time.minute(), meridiem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(273.15, 32)] // freezing point
    #[case(300.15, 81)] // 80.6 rounds up
    #[case(295.15, 72)] // 71.6 rounds up
    #[case(283.15, 50)] // exact
    #[case(255.372, 0)] // ~0 F
    fn test_kelvin_to_fahrenheit(#[case] kelvin: f64, #[case] expected: i64) {
        assert_eq!(kelvin_to_fahrenheit(kelvin), expected);
    }

    #[rstest]
    #[case("14:30:00", "2:30 PM")]
    #[case("00:05:00", "12:05 AM")]
    #[case("12:00:00", "12:00 PM")]
    #[case("11:59:00", "11:59 AM")]
    #[case("23:00:00", "11:00 PM")]
    fn test_format_12_hour(#[case] military: &str, #[case] expected: &str) {
        let time = NaiveTime::parse_from_str(military, "%H:%M:%S").unwrap();
        assert_eq!(format_12_hour(time), expected);
    }

    #[test]
    fn test_sample_date_and_time_display() {
        let timestamp =
            NaiveDateTime::parse_from_str("2024-03-01 14:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let sample = ForecastSample {
            timestamp,
            cloud_cover_percent: 40,
            humidity_percent: 60,
            temperature_kelvin: 300.15,
            description: "scattered clouds".to_string(),
            wind_speed: 4.6,
        };

        assert_eq!(sample.date_display(), "2024-03-01");
        assert_eq!(sample.time_display(), "2:30 PM");
        assert_eq!(sample.temperature_fahrenheit(), 81);
    }
}
