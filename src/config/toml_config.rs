use crate::core::loader::DEFAULT_MODEL_PATH;
use crate::domain::model::{InputBounds, ModelMetadata};
use crate::utils::error::{PredictorError, Result};
use crate::utils::logger::LOG_LEVELS;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "salary-predictor.toml";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub server: ServerConfig,
    pub input: InputBounds,
    pub logging: LoggingConfig,
    /// Model info shown in the About panel until an estimate brings the
    /// artifact's own metadata.
    pub about: ModelMetadata,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            server: ServerConfig::default(),
            input: InputBounds::default(),
            logging: LoggingConfig::default(),
            about: ModelMetadata {
                library: Some("Scikit-learn".to_string()),
                data_source: Some("Salary Data.csv".to_string()),
                target: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            title: "Professional Salary Predictor".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `compact` or `json`
    pub format: String,
    /// trace / debug / info / warn / error
    pub level: String,
    /// Forces `debug` regardless of `level`.
    pub verbose: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "compact".to_string(),
            level: "info".to_string(),
            verbose: false,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }

    pub fn effective_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.level
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            tracing::debug!("Loading configuration from {}", path.as_ref().display());
            Self::from_file(path)
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_PATH})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            PredictorError::ConfigValidationError {
                field: "env_substitution".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validation::validate_socket_addr("server.bind", &self.server.bind)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("model.path", &self.model.path)?;
        self.bind_addr()?;

        validation::validate_finite("input.min", self.input.min)?;
        validation::validate_finite("input.max", self.input.max)?;
        if self.input.min >= self.input.max {
            return Err(PredictorError::ConfigValidationError {
                field: "input".to_string(),
                message: format!(
                    "min ({}) must be smaller than max ({})",
                    self.input.min, self.input.max
                ),
            });
        }
        validation::validate_positive("input.step", self.input.step)?;
        validation::validate_range(
            "input.default",
            self.input.default,
            self.input.min,
            self.input.max,
        )?;

        validation::validate_one_of("logging.format", &self.logging.format, &["compact", "json"])?;
        validation::validate_one_of("logging.level", &self.logging.level, LOG_LEVELS)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_form() {
        let config = AppConfig::default();
        assert_eq!(config.model.path, "salary_model.json");
        assert_eq!(config.input, InputBounds::default());
        assert_eq!(config.input.step, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml_content = r#"
[model]
path = "models/salary.json"

[input]
max = 40.0
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model.path, "models/salary.json");
        assert_eq!(config.input.max, 40.0);
        assert_eq!(config.input.min, 0.0);
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SALARY_TEST_MODEL_PATH", "/srv/models/salary.json");

        let toml_content = r#"
[model]
path = "${SALARY_TEST_MODEL_PATH}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model.path, "/srv/models/salary.json");

        std::env::remove_var("SALARY_TEST_MODEL_PATH");
    }

    #[test]
    fn test_unset_env_var_left_in_place() {
        let toml_content = r#"
[model]
path = "${SALARY_TEST_DEFINITELY_UNSET}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model.path, "${SALARY_TEST_DEFINITELY_UNSET}");
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.input.default = 60.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.input.min = 50.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.server.bind = "not-an-address".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_level_from_toml() {
        let config = AppConfig::from_toml_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.effective_level(), "debug");
        assert!(!config.logging.verbose);
        assert!(config.validate().is_ok());

        let config = AppConfig::from_toml_str("[logging]\nlevel = \"warn\"\nverbose = true\n").unwrap();
        assert_eq!(config.logging.effective_level(), "debug");

        let config = AppConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_about_defaults_and_override() {
        let config = AppConfig::default();
        assert_eq!(config.about.library.as_deref(), Some("Scikit-learn"));
        assert_eq!(config.about.data_source.as_deref(), Some("Salary Data.csv"));

        let config = AppConfig::from_toml_str("[about]\ndata_source = \"hr_export.csv\"\n").unwrap();
        assert_eq!(config.about.data_source.as_deref(), Some("hr_export.csv"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml_str("[model\npath = 1").unwrap_err();
        assert!(matches!(err, PredictorError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind = \"0.0.0.0:9000\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_demo_config_is_valid() {
        let config = AppConfig::from_toml_str(include_str!("../../demos/salary-predictor.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.title, "Professional Salary Predictor");
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
