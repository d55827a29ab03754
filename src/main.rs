use clap::Parser;
use salary_predictor::config::Command;
use salary_predictor::presentation::{serve, AppState};
use salary_predictor::utils::logger;
use salary_predictor::{estimator_from_config, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(if cli.verbose { "debug" } else { "info" });
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let level = config.logging.effective_level();
    if config.logging.is_json() {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(level);
    }
    tracing::debug!("Resolved config: {:?}", config);

    let estimator = estimator_from_config(&config);

    match cli.command {
        Command::Serve { .. } => {
            let addr = config.bind_addr()?;
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!("📁 Model artifact: {}", config.model.path);
            let state = AppState::new(estimator, config.server.title.clone())
                .with_about(config.about.clone());
            serve(listener, state).await?;
        }
        Command::Predict { years, .. } => match estimator.estimate(years).await {
            Ok(estimate) => {
                println!("Estimated Annual Salary: {}", estimate.formatted);
            }
            Err(e) => {
                tracing::error!(
                    "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }
        },
    }

    Ok(())
}
