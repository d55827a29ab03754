use crate::domain::model::LinearRegressionModel;
use crate::domain::ports::{ModelSource, Predictor, Storage};
use crate::utils::error::{PredictorError, Result};
use async_trait::async_trait;

pub const DEFAULT_MODEL_PATH: &str = "salary_model.json";

/// Loads the serialized regression from storage on every call.
pub struct ModelLoader<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> ModelLoader<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 讀取並反序列化模型檔
    pub async fn load_model(&self) -> Result<LinearRegressionModel> {
        if !self.storage.exists(&self.path).await {
            tracing::warn!("Model file '{}' not found", self.path);
            return Err(PredictorError::ModelNotFound {
                path: self.path.clone(),
            });
        }

        let bytes = self
            .storage
            .read_file(&self.path)
            .await
            .map_err(|e| self.load_error(e.to_string()))?;

        let model: LinearRegressionModel =
            serde_json::from_slice(&bytes).map_err(|e| self.load_error(e.to_string()))?;
        model.check().map_err(|message| self.load_error(message))?;

        tracing::debug!(
            "Loaded model from '{}' ({} feature(s), intercept {})",
            self.path,
            model.n_features_in,
            model.intercept
        );
        Ok(model)
    }

    fn load_error(&self, message: String) -> PredictorError {
        tracing::error!("Error loading model '{}': {}", self.path, message);
        PredictorError::ModelLoad {
            path: self.path.clone(),
            message,
        }
    }
}

#[async_trait]
impl<S: Storage + 'static> ModelSource for ModelLoader<S> {
    async fn load(&self) -> Result<Box<dyn Predictor>> {
        let model = self.load_model().await?;
        Ok(Box::new(model))
    }

    fn location(&self) -> &str {
        &self.path
    }
}
