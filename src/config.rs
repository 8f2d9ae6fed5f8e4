use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use anyhow::Result;

/// Process-wide settings, loaded once at startup from the environment.
///
/// Every field has a default so the service boots with an empty environment;
/// readiness reports whether the secrets it needs were actually supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_allowed_hosts")]
    pub allowed_hosts: Vec<String>,

    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: u32,

    #[serde(default)]
    pub openrouter_api_key: String,
    #[serde(default = "default_openrouter_base_url")]
    pub openrouter_base_url: String,

    #[serde(default = "default_model")]
    pub vision_model: String,
    #[serde(default = "default_model")]
    pub text_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Upload ceiling in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
    #[serde(default = "default_allowed_image_types")]
    pub allowed_image_types: Vec<String>,
}

fn default_debug() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_hosts() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_secret_key() -> String {
    "dev-secret-key-change-in-production-123456789".to_string()
}

fn default_access_token_expire_minutes() -> u32 {
    30
}

fn default_openrouter_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "google/gemma-3n-e4b-it".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_max_file_size() -> usize {
    10 * 1024 * 1024
}

fn default_allowed_image_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
    ]
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first if present.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment file: {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }
        Self::from_environment(None)
    }

    /// Load settings from an explicit variable map instead of the process environment.
    pub fn from_env_map(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_environment(Some(vars))
    }

    fn from_environment(source: Option<HashMap<String, String>>) -> Result<Self> {
        let environment = config::Environment::default()
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("allowed_hosts")
            .with_list_parse_key("allowed_image_types")
            .source(source);

        let settings = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    pub fn api_key_configured(&self) -> bool {
        !self.openrouter_api_key.trim().is_empty()
    }

    pub fn secret_key_configured(&self) -> bool {
        !self.secret_key.trim().is_empty()
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_hosts.iter().any(|h| h.trim() == "*")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: default_debug(),
            host: default_host(),
            port: default_port(),
            allowed_hosts: default_allowed_hosts(),
            secret_key: default_secret_key(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
            openrouter_api_key: String::new(),
            openrouter_base_url: default_openrouter_base_url(),
            vision_model: default_model(),
            text_model: default_model(),
            max_tokens: default_max_tokens(),
            max_file_size: default_max_file_size(),
            allowed_image_types: default_allowed_image_types(),
        }
    }
}
