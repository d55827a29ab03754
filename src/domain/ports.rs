use crate::domain::model::{FeatureMatrix, ModelMetadata};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

/// Anything that maps a feature matrix to one output per row.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>>;

    fn metadata(&self) -> Option<&ModelMetadata> {
        None
    }
}

/// Produces a fresh predictor on every call.
#[async_trait]
pub trait ModelSource: Send + Sync {
    async fn load(&self) -> Result<Box<dyn Predictor>>;

    /// Where the artifact comes from, for logs and error text.
    fn location(&self) -> &str;
}
