pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::AppConfig;
pub use crate::core::{estimator::SalaryEstimator, loader::ModelLoader};
pub use domain::model::{InputBounds, LinearRegressionModel, SalaryEstimate};
pub use utils::error::{PredictorError, Result};

use std::sync::Arc;

/// Wire the default file-backed estimator for a resolved configuration.
pub fn estimator_from_config(config: &AppConfig) -> SalaryEstimator {
    let loader = ModelLoader::new(LocalStorage::current_dir(), config.model.path.clone());
    SalaryEstimator::new(Arc::new(loader), config.input)
}
