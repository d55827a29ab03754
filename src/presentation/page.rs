use crate::domain::model::{InputBounds, ModelMetadata, SalaryEstimate};
use crate::utils::error::{PredictorError, INFERENCE_WARNING};
use std::fmt::Write;

/// What the page shows below the button after a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Idle,
    Estimate(SalaryEstimate),
    /// Missing or corrupt artifact; prediction unavailable.
    ModelUnavailable { message: String },
    /// The model rejected the input.
    InferenceFailed { detail: String },
    InvalidInput { message: String },
}

impl From<PredictorError> for Outcome {
    fn from(err: PredictorError) -> Self {
        if err.is_model_unavailable() {
            return Outcome::ModelUnavailable {
                message: err.to_string(),
            };
        }
        match err {
            PredictorError::Inference { message } => Outcome::InferenceFailed { detail: message },
            other => Outcome::InvalidInput {
                message: other.to_string(),
            },
        }
    }
}

pub struct PageView<'a> {
    pub title: &'a str,
    pub bounds: &'a InputBounds,
    /// Model info for the About panel when no estimate carries its own.
    pub about: &'a ModelMetadata,
    /// Value to pre-fill; the last submission or the default.
    pub value: f64,
    pub outcome: &'a Outcome,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn render_about(out: &mut String, meta: &ModelMetadata) {
    out.push_str("<aside class=\"about\"><h2>About</h2>");
    out.push_str(
        "<p>This model uses <strong>Linear Regression</strong> to predict expected salary \
         based on years of professional experience.</p>",
    );
    if meta.library.is_some() || meta.data_source.is_some() || meta.target.is_some() {
        out.push_str("<p><strong>Model Info:</strong></p><ul>");
        if let Some(library) = &meta.library {
            let _ = write!(out, "<li>Library: {}</li>", escape_html(library));
        }
        if let Some(source) = &meta.data_source {
            let _ = write!(out, "<li>Data Source: {}</li>", escape_html(source));
        }
        if let Some(target) = &meta.target {
            let _ = write!(out, "<li>Target: {}</li>", escape_html(target));
        }
        out.push_str("</ul>");
    }
    out.push_str("</aside>");
}

fn render_outcome(out: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Idle => {}
        Outcome::Estimate(estimate) => {
            let _ = write!(
                out,
                "<div class=\"result-box\"><div>Estimated Annual Salary</div>\
                 <div class=\"amount\">{}</div></div>",
                escape_html(&estimate.formatted)
            );
        }
        Outcome::ModelUnavailable { message } => {
            let _ = write!(out, "<div class=\"error\">{}</div>", escape_html(message));
        }
        Outcome::InferenceFailed { detail } => {
            let _ = write!(
                out,
                "<div class=\"warning\">&#9888;&#65039; {}</div>\
                 <div class=\"error\">Detailed Error: {}</div>",
                escape_html(INFERENCE_WARNING),
                escape_html(detail)
            );
        }
        Outcome::InvalidInput { message } => {
            let _ = write!(out, "<div class=\"error\">{}</div>", escape_html(message));
        }
    }
}

/// Render the whole page. Each request renders from scratch.
pub fn render(view: &PageView<'_>) -> String {
    let mut out = String::with_capacity(2048);
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title></head><body>",
        escape_html(view.title)
    );

    let metadata = match view.outcome {
        Outcome::Estimate(estimate) => estimate.model.as_ref().unwrap_or(view.about),
        _ => view.about,
    };
    render_about(&mut out, metadata);

    out.push_str("<main><h1>&#128176; Salary Prediction AI</h1>");
    out.push_str("<h3>estimate your market value instantly</h3><hr>");
    let _ = write!(
        out,
        "<form method=\"post\" action=\"/predict\">\
         <label for=\"years_experience\">Enter Years of Experience:</label>\
         <input type=\"number\" id=\"years_experience\" name=\"years_experience\" \
         min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" \
         title=\"Enter the total number of professional working years.\" required>\
         <button type=\"submit\">Calculate Salary</button></form>",
        min = view.bounds.min,
        max = view.bounds.max,
        step = view.bounds.step,
        value = view.value,
    );

    render_outcome(&mut out, view.outcome);
    out.push_str("</main></body></html>");
    out
}
