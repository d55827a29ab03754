use crate::domain::model::{FeatureMatrix, LinearRegressionModel, ModelMetadata};
use crate::domain::ports::Predictor;
use crate::utils::error::{PredictorError, Result};

impl Predictor for LinearRegressionModel {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        if features.n_rows() == 0 {
            return Err(PredictorError::Inference {
                message: "Expected 2D array, got an empty array instead".to_string(),
            });
        }

        features
            .rows()
            .iter()
            .map(|row| {
                if row.len() != self.n_features_in {
                    return Err(PredictorError::Inference {
                        message: format!(
                            "X has {} features, but LinearRegression is expecting {} features as input.",
                            row.len(),
                            self.n_features_in
                        ),
                    });
                }

                let value = row
                    .iter()
                    .zip(&self.coef)
                    .fold(self.intercept, |acc, (x, w)| acc + x * w);

                if !value.is_finite() {
                    return Err(PredictorError::Inference {
                        message: format!("Prediction overflowed for input {:?}", row),
                    });
                }
                Ok(value)
            })
            .collect()
    }

    fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }
}
