use thiserror::Error;

/// Warning shown above the detail text when the model rejects the input.
pub const INFERENCE_WARNING: &str =
    "The model expects valid feature names or the shape of the data doesn't match.";

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Model file '{path}' not found in the directory.")]
    ModelNotFound { path: String },

    #[error("Error loading model: {message}")]
    ModelLoad { path: String, message: String },

    #[error("{message}")]
    Inference { message: String },

    #[error("Years of experience {value} is outside the accepted range [{min}, {max}]")]
    InputOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Model,
    Inference,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PredictorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ModelNotFound { .. } | Self::ModelLoad { .. } => ErrorCategory::Model,
            Self::Inference { .. } => ErrorCategory::Inference,
            Self::InputOutOfRange { .. } | Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Inference => ErrorSeverity::Medium,
            ErrorCategory::Model | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 顯示給使用者的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Inference { message } => {
                format!("{} Detailed Error: {}", INFERENCE_WARNING, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ModelNotFound { .. } => {
                "Place the exported model file next to the binary or point [model] path at it"
            }
            Self::ModelLoad { .. } => {
                "Re-export the model artifact; it must be a JSON linear regression with matching coef and n_features_in"
            }
            Self::Inference { .. } => {
                "Check that the model was trained on a single feature (years of experience)"
            }
            Self::InputOutOfRange { .. } | Self::InvalidInput { .. } => {
                "Enter a number of years between the accepted bounds"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file and try again"
            }
            Self::IoError(_) => "Check file permissions and the working directory",
        }
    }

    /// Model problems block prediction entirely; everything else is per-request.
    pub fn is_model_unavailable(&self) -> bool {
        self.category() == ErrorCategory::Model
    }

    /// Process exit code for the one-shot `predict` command.
    pub fn exit_code(&self) -> i32 {
        if self.is_model_unavailable() {
            return 2;
        }
        match self.category() {
            ErrorCategory::Inference => 3,
            _ => 1,
        }
    }
}

/// 0 on success, otherwise the error's own code.
pub fn exit_code_for<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => e.exit_code(),
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
