use anyhow::Result;
use async_trait::async_trait;
use salary_predictor::core::{FeatureMatrix, ModelSource, Predictor};
use salary_predictor::utils::error::{PredictorError, INFERENCE_WARNING};
use salary_predictor::{InputBounds, LocalStorage, ModelLoader, SalaryEstimator};
use std::sync::Arc;
use tempfile::TempDir;

const MODEL_JSON: &str = r#"{
    "coef": [9449.962321455077],
    "intercept": 25792.20019866871,
    "n_features_in": 1,
    "feature_names": ["YearsExperience"],
    "metadata": {"library": "scikit-learn", "data_source": "Salary Data.csv", "target": "Salary"}
}"#;

fn estimator_in(dir: &TempDir) -> SalaryEstimator {
    let loader = ModelLoader::new(LocalStorage::new(dir.path()), "salary_model.json");
    SalaryEstimator::new(Arc::new(loader), InputBounds::default())
}

fn write_model(dir: &TempDir, content: &str) -> Result<()> {
    std::fs::write(dir.path().join("salary_model.json"), content)?;
    Ok(())
}

fn has_at_most_two_decimals(value: f64) -> bool {
    let scaled = value * 100.0;
    (scaled - scaled.round()).abs() < 1e-6
}

#[tokio::test]
async fn test_every_valid_input_yields_rounded_result() -> Result<()> {
    let dir = TempDir::new()?;
    write_model(&dir, MODEL_JSON)?;
    let estimator = estimator_in(&dir);

    for step in 0..=100 {
        let years = step as f64 * 0.5;
        let estimate = estimator.estimate(years).await?;
        assert!(estimate.estimate.is_finite());
        assert!(
            has_at_most_two_decimals(estimate.estimate),
            "{} has more than two decimals",
            estimate.estimate
        );
        assert!(estimate.formatted.starts_with('$'));
    }
    Ok(())
}

#[tokio::test]
async fn test_known_value() -> Result<()> {
    let dir = TempDir::new()?;
    write_model(&dir, MODEL_JSON)?;
    let estimate = estimator_in(&dir).estimate(5.0).await?;

    assert_eq!(estimate.estimate, 73042.01);
    assert_eq!(estimate.formatted, "$73,042.01");
    let model = estimate.model.expect("metadata carried through");
    assert_eq!(model.library.as_deref(), Some("scikit-learn"));
    Ok(())
}

#[tokio::test]
async fn test_missing_model_reports_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let err = estimator_in(&dir).estimate(5.0).await.unwrap_err();

    assert!(matches!(err, PredictorError::ModelNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Model file 'salary_model.json' not found in the directory."
    );
    Ok(())
}

#[tokio::test]
async fn test_corrupt_model_reports_load_error() -> Result<()> {
    let dir = TempDir::new()?;
    write_model(&dir, "this is a pickle, not json")?;
    let err = estimator_in(&dir).estimate(5.0).await.unwrap_err();

    assert!(matches!(err, PredictorError::ModelLoad { .. }));
    assert!(err.to_string().starts_with("Error loading model:"));
    Ok(())
}

#[tokio::test]
async fn test_shape_mismatch_reports_warning_and_detail() -> Result<()> {
    let dir = TempDir::new()?;
    write_model(
        &dir,
        r#"{"coef": [1.0, 2.0], "intercept": 0.0, "n_features_in": 2}"#,
    )?;
    let err = estimator_in(&dir).estimate(5.0).await.unwrap_err();

    assert!(matches!(err, PredictorError::Inference { .. }));
    let message = err.user_friendly_message();
    assert!(message.starts_with(INFERENCE_WARNING));
    assert!(message.contains("Detailed Error: X has 1 features"));
    Ok(())
}

struct FailingPredictor;

impl Predictor for FailingPredictor {
    fn predict(&self, _features: &FeatureMatrix) -> salary_predictor::Result<Vec<f64>> {
        Err(PredictorError::Inference {
            message: "feature names should match those that were passed during fit".to_string(),
        })
    }
}

struct FailingSource;

#[async_trait]
impl ModelSource for FailingSource {
    async fn load(&self) -> salary_predictor::Result<Box<dyn Predictor>> {
        Ok(Box::new(FailingPredictor))
    }

    fn location(&self) -> &str {
        "failing"
    }
}

#[tokio::test]
async fn test_raising_predictor_produces_no_result() {
    let estimator = SalaryEstimator::new(Arc::new(FailingSource), InputBounds::default());
    let err = estimator.estimate(12.0).await.unwrap_err();
    assert!(err
        .user_friendly_message()
        .ends_with("Detailed Error: feature names should match those that were passed during fit"));
}

#[tokio::test]
async fn test_same_input_same_artifact_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    write_model(&dir, MODEL_JSON)?;
    let estimator = estimator_in(&dir);

    let first = estimator.estimate(7.5).await?;
    let second = estimator.estimate(7.5).await?;
    assert_eq!(first.estimate, second.estimate);
    assert_eq!(first.formatted, second.formatted);
    Ok(())
}

#[tokio::test]
async fn test_boundaries_accepted() -> Result<()> {
    let dir = TempDir::new()?;
    write_model(&dir, MODEL_JSON)?;
    let estimator = estimator_in(&dir);

    let low = estimator.estimate(0.0).await?;
    assert_eq!(low.estimate, 25792.2);
    assert!(estimator.estimate(50.0).await.is_ok());

    for bad in [-0.5, 50.5, f64::NAN] {
        let err = estimator.estimate(bad).await.unwrap_err();
        assert!(matches!(err, PredictorError::InputOutOfRange { .. }));
    }
    Ok(())
}

#[tokio::test]
async fn test_artifact_replaced_between_requests() -> Result<()> {
    let dir = TempDir::new()?;
    write_model(&dir, r#"{"coef": [1000.0], "intercept": 0.0, "n_features_in": 1}"#)?;
    let estimator = estimator_in(&dir);
    assert_eq!(estimator.estimate(2.0).await?.estimate, 2000.0);

    write_model(&dir, r#"{"coef": [2000.0], "intercept": 0.0, "n_features_in": 1}"#)?;
    assert_eq!(estimator.estimate(2.0).await?.estimate, 4000.0);
    Ok(())
}
