//! Server configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `logihub.toml` (optional)
//! 3. `OPENAI_API_KEY`
//! 4. `LOGIHUB_*` environment variables, `__` separating nested keys
//!    (`LOGIHUB_SERVER__PORT=9000`, `LOGIHUB_SESSION__SECRET=...`)

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

use logihub_assistant::LlmSettings;
use logihub_assistant::llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use logihub_infra::SupabaseSettings;
use logihub_observability::LogFormat;

pub const DEFAULT_CONFIG_FILE: &str = "logihub.toml";

/// Development fallback; `main` warns when it is in use.
pub const DEV_SESSION_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_secret")]
    pub secret: SecretString,
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,
}

fn default_session_secret() -> SecretString {
    SecretString::new(DEV_SESSION_SECRET.to_string())
}

fn default_ttl_minutes() -> i64 {
    480
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { secret: default_session_secret(), ttl_minutes: default_ttl_minutes() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// Without a key the widget answers from rules and the proxy function
    /// returns an error.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    1500
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AssistantConfig {
    pub fn llm_settings(&self) -> Option<LlmSettings> {
        let api_key = self.api_key.clone()?;
        Some(LlmSettings {
            endpoint: self.endpoint.clone(),
            api_key,
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: SecretString,
}

impl SupabaseConfig {
    pub fn settings(&self) -> SupabaseSettings {
        SupabaseSettings { url: self.url.clone(), key: self.key.clone() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { log_level: default_log_level(), log_format: LogFormat::default() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub supabase: Option<SupabaseConfig>,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from `logihub.toml` in the working directory and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::raw().only(&["OPENAI_API_KEY"]).map(|_| "assistant.api_key".into()))
            .merge(Env::prefixed("LOGIHUB_").split("__"))
            .extract()
            .map_err(Box::new)?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.ttl_minutes <= 0 {
            return Err(ConfigError::Invalid("session.ttl_minutes must be positive".into()));
        }
        if let Some(supabase) = &self.supabase {
            if supabase.url.trim().is_empty() {
                return Err(ConfigError::Invalid("supabase.url is empty".into()));
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session.ttl_minutes)
    }
}
