#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Crime rate prediction engine.
//!
//! Turns a (city, crime type, year) triple into a [`PredictionResult`]:
//! the 2011 population is scaled to the target year, the trained
//! regression model is evaluated on `(year, city, population, crime type)`,
//! and the resulting rate is classified and converted to a case estimate.
//!
//! The model is loaded once by the caller and injected into
//! [`PredictionEngine`] behind the [`RegressionModel`] trait, so tests can
//! substitute a stub.

pub mod engine;
pub mod model;
pub mod paths;
pub mod population;

use std::path::Path;
use std::sync::Arc;

use crime_rate_reference::ReferenceError;

pub use crime_rate_prediction_models::{
    CrimeStatus, FeatureVector, PredictionRequest, PredictionResult,
};
pub use engine::{PredictionEngine, PredictionInput, parse_year};
pub use model::{ModelError, RandomForestModel, RegressionModel};

/// Errors reported to callers of the prediction engine.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// One or more inputs were not supplied.
    #[error("Missing input: {}", .fields.join(", "))]
    MissingInput {
        /// Names of the absent fields, in input order.
        fields: Vec<&'static str>,
    },

    /// A name or code is not in the catalogs.
    #[error(transparent)]
    UnknownReference(#[from] ReferenceError),

    /// The year is not an integer.
    #[error("Invalid year '{value}': expected an integer")]
    InvalidInput {
        /// The rejected input.
        value: String,
    },

    /// The model failed to produce a usable prediction.
    #[error("Model inference failed: {0}")]
    ModelInference(#[from] ModelError),
}

impl PredictionError {
    /// Returns the message shown to end users.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingInput { .. } => "Please select all inputs!".to_string(),
            Self::UnknownReference(e) => format!("{e}. Please choose a value from the list."),
            Self::InvalidInput { value } => format!("'{value}' is not a valid year."),
            Self::ModelInference(e) => format!("Prediction failed ({e}). Please try again."),
        }
    }
}

/// Loads the forest artifact at `path` for sharing across predictions.
///
/// # Errors
///
/// Returns [`ModelError`] if the artifact cannot be read or is malformed.
pub fn load_model(path: &Path) -> Result<Arc<dyn RegressionModel>, ModelError> {
    log::info!("Loading model from {}", path.display());
    let forest = RandomForestModel::load(path)?;
    log::info!(
        "Loaded model: {} trees, {} nodes",
        forest.tree_count(),
        forest.node_count()
    );
    Ok(Arc::new(forest))
}
