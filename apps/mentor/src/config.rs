use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_LLM_MODEL: &str = "deepseek/deepseek-r1-distill-qwen-32b:free";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to every component that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    /// Model used for query classification. Defaults to `llm_model`.
    pub classifier_model: String,
    pub llm_temperature: Option<f32>,
    pub llm_timeout_secs: u64,
    pub upload_dir: PathBuf,
    pub questions_csv_path: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source. Empty or blank values count as unset.
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let llm_model = optional("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());

        Ok(Config {
            llm_api_key: optional("LLM_API_KEY")
                .context("Required environment variable 'LLM_API_KEY' is not set")?,
            llm_base_url: optional("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            classifier_model: optional("CLASSIFIER_MODEL").unwrap_or_else(|| llm_model.clone()),
            llm_model,
            llm_temperature: optional("LLM_TEMPERATURE")
                .map(|v| v.parse::<f32>())
                .transpose()
                .context("LLM_TEMPERATURE must be a number")?,
            llm_timeout_secs: optional("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            upload_dir: optional("UPLOAD_DIR")
                .unwrap_or_else(|| "uploads".to_string())
                .into(),
            questions_csv_path: optional("QUESTIONS_CSV_PATH")
                .unwrap_or_else(|| "commands.csv".to_string())
                .into(),
            max_upload_bytes: optional("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port: optional("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
