//! The prediction pipeline: validate, derive features, infer, classify.

use std::sync::Arc;

use crime_rate_prediction_models::{CrimeStatus, FeatureVector, PredictionRequest, PredictionResult};
use crime_rate_reference as reference;
use serde::{Deserialize, Serialize};

use crate::PredictionError;
use crate::model::{ModelError, RegressionModel};
use crate::population::{adjust_population, estimate_cases};

/// Raw caller input, before anything has been checked.
///
/// Blank strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInput {
    pub city: Option<String>,
    pub crime_type: Option<String>,
    pub year: Option<String>,
}

impl PredictionInput {
    #[must_use]
    pub fn new(city: impl Into<String>, crime_type: impl Into<String>, year: impl ToString) -> Self {
        Self {
            city: Some(city.into()),
            crime_type: Some(crime_type.into()),
            year: Some(year.to_string()),
        }
    }
}

/// Parses a year, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`PredictionError::InvalidInput`] if `value` is not an integer.
pub fn parse_year(value: &str) -> Result<i32, PredictionError> {
    value
        .trim()
        .parse()
        .map_err(|_| PredictionError::InvalidInput {
            value: value.to_string(),
        })
}

/// Runs predictions against one shared, read-only model.
#[derive(Clone)]
pub struct PredictionEngine {
    model: Arc<dyn RegressionModel>,
}

impl PredictionEngine {
    #[must_use]
    pub fn new(model: Arc<dyn RegressionModel>) -> Self {
        Self { model }
    }

    /// Predicts from raw caller input.
    ///
    /// All three fields are checked for presence before anything else, so
    /// the model is never invoked with incomplete input.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::MissingInput`] listing every absent field,
    /// [`PredictionError::UnknownReference`] for names outside the
    /// catalogs, [`PredictionError::InvalidInput`] for a non-integer year,
    /// or [`PredictionError::ModelInference`] if the model fails.
    pub fn predict_input(&self, input: &PredictionInput) -> Result<PredictionResult, PredictionError> {
        let present = |field: &Option<String>| {
            field
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .map(ToString::to_string)
        };

        let city = present(&input.city);
        let crime_type = present(&input.crime_type);
        let year = present(&input.year);

        let (Some(city), Some(crime_type), Some(year)) = (city, crime_type, year) else {
            let fields = [
                ("city", input.city.as_ref()),
                ("crime type", input.crime_type.as_ref()),
                ("year", input.year.as_ref()),
            ]
            .into_iter()
            .filter(|(_, value)| value.is_none_or(|value| value.trim().is_empty()))
            .map(|(name, _)| name)
            .collect();
            return Err(PredictionError::MissingInput { fields });
        };

        let city_code = reference::resolve_city(&city)?;
        let crime_type_code = reference::resolve_crime_type(&crime_type)?;
        let year = parse_year(&year)?;

        self.predict(city_code, crime_type_code, year)
    }

    /// Predicts for an already-resolved request.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::ModelInference`] if the model fails.
    pub fn predict_request(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, PredictionError> {
        self.predict(request.city.code(), request.crime_type.code(), request.year)
    }

    /// Predicts the crime rate for catalog codes and a year.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::UnknownReference`] for codes outside the
    /// catalogs or [`PredictionError::ModelInference`] if the model fails
    /// or yields a non-finite rate.
    pub fn predict(
        &self,
        city_code: u8,
        crime_type_code: u8,
        year: i32,
    ) -> Result<PredictionResult, PredictionError> {
        let city = reference::city_name(city_code)?;
        let crime_type = reference::crime_type_name(crime_type_code)?;
        let base_population = reference::base_population(city_code)?;

        let adjusted_population = adjust_population(base_population, year);
        let features = FeatureVector::new(year, city_code, adjusted_population, crime_type_code);

        log::debug!("predict: features={features:?}");
        let crime_rate = self.model.predict(&features)?;
        if !crime_rate.is_finite() {
            return Err(ModelError::inference(format!("model returned {crime_rate}")).into());
        }

        let crime_status = CrimeStatus::from_rate(crime_rate);
        let estimated_cases = estimate_cases(crime_rate, adjusted_population)?;

        log::debug!(
            "predict: {city}/{crime_type}/{year} rate={crime_rate:.4} status={crime_status:?} cases={estimated_cases}"
        );

        Ok(PredictionResult {
            city: city.to_string(),
            crime_type: crime_type.to_string(),
            year,
            adjusted_population,
            crime_rate,
            crime_status,
            estimated_cases,
        })
    }
}
