use crate::core::estimator::SalaryEstimator;
use crate::domain::model::{ExperienceInput, ModelMetadata, SalaryEstimate};
use crate::presentation::page::{self, Outcome, PageView};
use crate::utils::error::{ErrorCategory, PredictorError, INFERENCE_WARNING};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    estimator: SalaryEstimator,
    title: Arc<str>,
    about: Arc<ModelMetadata>,
}

impl AppState {
    pub fn new(estimator: SalaryEstimator, title: impl Into<Arc<str>>) -> Self {
        Self {
            estimator,
            title: title.into(),
            about: Arc::new(ModelMetadata::default()),
        }
    }

    /// Model info for the About panel before any estimate is made.
    pub fn with_about(mut self, about: ModelMetadata) -> Self {
        self.about = Arc::new(about);
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub years_experience: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub years_experience: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub category: ErrorCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// JSON error wrapper for the API route.
pub struct ApiError(PredictorError);

impl From<PredictorError> for ApiError {
    fn from(err: PredictorError) -> Self {
        Self(err)
    }
}

// 無法解析的 JSON 主體視為輸入錯誤
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PredictorError::InvalidInput {
            field: "years_experience".to_string(),
            reason: rejection.body_text(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let category = self.0.category();
        let status = if self.0.is_model_unavailable() {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            match category {
                ErrorCategory::Input | ErrorCategory::Inference => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };
        let body = match self.0 {
            PredictorError::Inference { message } => ErrorBody {
                error: INFERENCE_WARNING.to_string(),
                category,
                detail: Some(message),
            },
            other => ErrorBody {
                error: other.to_string(),
                category,
                detail: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/api/predict", post(predict_json))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let bounds = state.estimator.bounds();
    Html(page::render(&PageView {
        title: &state.title,
        bounds,
        about: &state.about,
        value: bounds.default,
        outcome: &Outcome::Idle,
    }))
}

async fn predict_form(
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> Html<String> {
    let bounds = *state.estimator.bounds();

    // 保留使用者輸入的值以便重新顯示
    let value = form
        .years_experience
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(bounds.default);

    let outcome = match ExperienceInput::parse(&form.years_experience, &bounds) {
        Ok(input) => match state.estimator.estimate_input(input).await {
            Ok(estimate) => Outcome::Estimate(estimate),
            Err(e) => {
                tracing::warn!("Prediction failed: {}", e);
                Outcome::from(e)
            }
        },
        Err(e) => {
            tracing::debug!("Rejected form input: {}", e);
            Outcome::from(e)
        }
    };

    Html(page::render(&PageView {
        title: &state.title,
        bounds: &bounds,
        about: &state.about,
        value,
        outcome: &outcome,
    }))
}

async fn predict_json(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<SalaryEstimate>, ApiError> {
    let Json(request) = payload?;
    let estimate = state.estimator.estimate(request.years_experience).await?;
    Ok(Json(estimate))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "model_path": state.estimator.model_location(),
    }))
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚀 Salary predictor listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
