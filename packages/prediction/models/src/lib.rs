#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request, feature vector, and result types for crime rate prediction.
//!
//! These types carry no behavior beyond classification and formatting so
//! that callers (CLI, tests, future services) can depend on them without
//! pulling in the model runtime.

use std::fmt;

use crime_rate_reference::{City, CrimeType};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A validated prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    /// City to predict for.
    pub city: City,
    /// Crime category to predict.
    pub crime_type: CrimeType,
    /// Target year.
    pub year: i32,
}

/// Names of the model inputs, in the order the model expects them.
pub const FEATURE_NAMES: [&str; 4] = ["year", "city_code", "adjusted_population", "crime_type_code"];

/// The four inputs handed to the regression model.
///
/// Field order is the model's column order and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureVector {
    pub year: i32,
    pub city_code: u8,
    /// Population in lakhs, adjusted to `year`.
    pub adjusted_population: f64,
    pub crime_type_code: u8,
}

impl FeatureVector {
    #[must_use]
    pub const fn new(year: i32, city_code: u8, adjusted_population: f64, crime_type_code: u8) -> Self {
        Self {
            year,
            city_code,
            adjusted_population,
            crime_type_code,
        }
    }

    /// Returns the features as a numeric row in model column order.
    #[must_use]
    pub fn to_row(&self) -> [f64; 4] {
        [
            f64::from(self.year),
            f64::from(self.city_code),
            self.adjusted_population,
            f64::from(self.crime_type_code),
        ]
    }
}

/// Qualitative band for a predicted crime rate, ordered from safest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrimeStatus {
    /// Rate up to and including 1
    #[strum(to_string = "Very Low Crime Area")]
    VeryLow,
    /// Rate above 1, up to and including 5
    #[strum(to_string = "Low Crime Area")]
    Low,
    /// Rate above 5, up to and including 15
    #[strum(to_string = "High Crime Area")]
    High,
    /// Rate above 15
    #[strum(to_string = "Very High Crime Area")]
    VeryHigh,
}

impl CrimeStatus {
    /// Classifies a crime rate. Upper bounds are inclusive.
    #[must_use]
    pub fn from_rate(rate: f64) -> Self {
        if rate <= 1.0 {
            Self::VeryLow
        } else if rate <= 5.0 {
            Self::Low
        } else if rate <= 15.0 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// Returns the label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low Crime Area",
            Self::Low => "Low Crime Area",
            Self::High => "High Crime Area",
            Self::VeryHigh => "Very High Crime Area",
        }
    }

    /// Returns all variants in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::VeryLow, Self::Low, Self::High, Self::VeryHigh]
    }
}

/// Outcome of a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// City display name.
    pub city: String,
    /// Crime type display name.
    pub crime_type: String,
    /// Target year.
    pub year: i32,
    /// Population in lakhs adjusted to `year`.
    pub adjusted_population: f64,
    /// Model output, incidents per lakh.
    pub crime_rate: f64,
    /// Band the rate falls into.
    pub crime_status: CrimeStatus,
    /// `ceil(crime_rate * adjusted_population)`.
    pub estimated_cases: i64,
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "City: {}", self.city)?;
        writeln!(f, "Crime Type: {}", self.crime_type)?;
        writeln!(f, "Year: {}", self.year)?;
        writeln!(f, "Crime Status: {}", self.crime_status.label())?;
        writeln!(f, "Crime Rate: {:.2}", self.crime_rate)?;
        writeln!(f, "Estimated Cases: {}", self.estimated_cases)?;
        write!(f, "Population: {:.2} Lakhs", self.adjusted_population)
    }
}
