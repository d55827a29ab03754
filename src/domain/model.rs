use crate::utils::error::{PredictorError, Result};
use crate::utils::format::{format_currency, round_to_cents};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bounds and defaults of the experience field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 50.0,
            step: 0.5,
            default: 5.0,
        }
    }
}

/// Years of professional experience, already checked against [`InputBounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceInput(f64);

impl ExperienceInput {
    pub fn new(years: f64, bounds: &InputBounds) -> Result<Self> {
        // 兩端皆為閉區間；NaN 不會通過
        if !(years >= bounds.min && years <= bounds.max) {
            return Err(PredictorError::InputOutOfRange {
                value: years,
                min: bounds.min,
                max: bounds.max,
            });
        }
        Ok(Self(years))
    }

    /// Parse raw form text. Blank input falls back to the field default.
    pub fn parse(raw: &str, bounds: &InputBounds) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::new(bounds.default, bounds);
        }
        let years = trimmed
            .parse::<f64>()
            .map_err(|e| PredictorError::InvalidInput {
                field: "years_experience".to_string(),
                reason: format!("'{}' is not a number ({})", trimmed, e),
            })?;
        Self::new(years, bounds)
    }

    pub fn years(&self) -> f64 {
        self.0
    }
}

/// Row-major feature matrix handed to a predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// The single-row, single-feature shape used for one prediction.
    pub fn single(value: f64) -> Self {
        Self {
            rows: vec![vec![value]],
        }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub library: Option<String>,
    pub data_source: Option<String>,
    pub target: Option<String>,
}

/// A fitted linear regression as exported to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressionModel {
    pub coef: Vec<f64>,
    pub intercept: f64,
    pub n_features_in: usize,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl LinearRegressionModel {
    pub fn simple(slope: f64, intercept: f64) -> Self {
        Self {
            coef: vec![slope],
            intercept,
            n_features_in: 1,
            feature_names: None,
            metadata: None,
        }
    }

    /// Structural checks run right after deserialization.
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.n_features_in == 0 {
            return Err("n_features_in must be at least 1".to_string());
        }
        if self.coef.len() != self.n_features_in {
            return Err(format!(
                "coef has {} entries but n_features_in is {}",
                self.coef.len(),
                self.n_features_in
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.len() != self.n_features_in {
                return Err(format!(
                    "feature_names has {} entries but n_features_in is {}",
                    names.len(),
                    self.n_features_in
                ));
            }
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|c| !c.is_finite()) {
            return Err("coefficients must be finite numbers".to_string());
        }
        Ok(())
    }
}

/// Rounded prediction ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryEstimate {
    pub years_experience: f64,
    pub estimate: f64,
    pub formatted: String,
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelMetadata>,
}

impl SalaryEstimate {
    pub fn new(input: ExperienceInput, raw_prediction: f64) -> Self {
        let estimate = round_to_cents(raw_prediction);
        Self {
            years_experience: input.years(),
            estimate,
            formatted: format_currency(estimate),
            generated_at: Utc::now(),
            model: None,
        }
    }

    pub fn with_model(mut self, metadata: Option<ModelMetadata>) -> Self {
        self.model = metadata;
        self
    }
}
