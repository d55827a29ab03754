use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Fallback directives when `RUST_LOG` is unset. Request tracing from
/// tower-http is only shown at debug and below.
pub fn filter_directives(level: &str) -> String {
    match level {
        "trace" | "debug" => format!("salary_predictor={level},tower_http={level},info"),
        "info" => "salary_predictor=info,warn".to_string(),
        other => format!("salary_predictor={other},{other}"),
    }
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(level)))
}

pub fn init_cli_logger(level: &str) {
    tracing_subscriber::registry()
        .with(default_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(default_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // 部署環境使用 JSON 以便收集
        )
        .init();
}
