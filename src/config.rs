use std::time::Duration;
use thiserror::Error;

use crate::prompt::InstructionMode;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
    pub instruction_mode: InstructionMode,
    pub port: u16,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            instruction_mode: InstructionMode::default(),
            port: DEFAULT_PORT,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(base) = lookup("GEMINI_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
            config.model = model;
        }
        if let Some(raw) = lookup("GEMINI_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid { key: "GEMINI_TIMEOUT_SECS", value: raw.clone() })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup("GEMINI_INLINE_INSTRUCTIONS") {
            config.instruction_mode = if parse_flag("GEMINI_INLINE_INSTRUCTIONS", &raw)? {
                InstructionMode::Inline
            } else {
                InstructionMode::SystemInstruction
            };
        }
        if let Some(raw) = lookup("PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid { key: "PORT", value: raw.clone() })?;
        }
        Ok(config)
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: raw.to_string() }),
    }
}
