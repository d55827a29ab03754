use crate::config::toml_config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "salary-predictor")]
#[command(about = "Estimate a salary from years of professional experience")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the interactive prediction form
    Serve {
        /// Address to listen on (overrides [server] bind)
        #[arg(long)]
        bind: Option<String>,

        /// Model artifact path (overrides [model] path)
        #[arg(long)]
        model: Option<String>,
    },

    /// Run one prediction and print the formatted estimate
    Predict {
        /// Years of professional experience
        #[arg(long, allow_negative_numbers = true)]
        years: f64,

        /// Model artifact path (overrides [model] path)
        #[arg(long)]
        model: Option<String>,
    },
}

impl CliConfig {
    /// 讀取設定檔並套用命令列覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::load_or_default(&self.config)?;

        if self.verbose {
            config.logging.verbose = true;
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }

        match &self.command {
            Command::Serve { bind, model } => {
                if let Some(bind) = bind {
                    config.server.bind = bind.clone();
                }
                if let Some(model) = model {
                    config.model.path = model.clone();
                }
            }
            Command::Predict { model, .. } => {
                if let Some(model) = model {
                    config.model.path = model.clone();
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}
