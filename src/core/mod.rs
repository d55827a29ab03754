pub mod estimator;
pub mod linear;
pub mod loader;

pub use crate::domain::model::{ExperienceInput, FeatureMatrix, InputBounds, SalaryEstimate};
pub use crate::domain::ports::{ModelSource, Predictor, Storage};
pub use crate::utils::error::Result;
