use crate::domain::model::{ExperienceInput, FeatureMatrix, InputBounds, SalaryEstimate};
use crate::domain::ports::ModelSource;
use crate::utils::error::{PredictorError, Result};
use std::sync::Arc;

/// Turns one experience value into a rounded salary estimate.
///
/// Every call reloads the model through its [`ModelSource`]; nothing is cached
/// between calls, so replacing the artifact on disk takes effect on the next
/// request.
#[derive(Clone)]
pub struct SalaryEstimator {
    source: Arc<dyn ModelSource>,
    bounds: InputBounds,
}

impl SalaryEstimator {
    pub fn new(source: Arc<dyn ModelSource>, bounds: InputBounds) -> Self {
        Self { source, bounds }
    }

    pub fn bounds(&self) -> &InputBounds {
        &self.bounds
    }

    pub fn model_location(&self) -> &str {
        self.source.location()
    }

    pub async fn estimate(&self, years: f64) -> Result<SalaryEstimate> {
        let input = ExperienceInput::new(years, &self.bounds)?;
        self.estimate_input(input).await
    }

    pub async fn estimate_input(&self, input: ExperienceInput) -> Result<SalaryEstimate> {
        let predictor = self.source.load().await?;

        let features = FeatureMatrix::single(input.years());
        let predictions = predictor.predict(&features)?;
        let raw = predictions
            .first()
            .copied()
            .ok_or_else(|| PredictorError::Inference {
                message: "Model returned no predictions".to_string(),
            })?;
        if !raw.is_finite() {
            return Err(PredictorError::Inference {
                message: format!("Model returned a non-finite prediction ({})", raw),
            });
        }

        let estimate =
            SalaryEstimate::new(input, raw).with_model(predictor.metadata().cloned());
        tracing::info!(
            "Estimated {} for {} year(s) of experience",
            estimate.formatted,
            input.years()
        );
        Ok(estimate)
    }
}
