use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable holding the LLM provider API key
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Environment variable overriding the chat-completions endpoint
pub const ENDPOINT_VAR: &str = "LINK_SIFT_LLM_ENDPOINT";

/// Environment variable overriding the model identifier
pub const MODEL_VAR: &str = "LINK_SIFT_MODEL";

/// Configuration for the LLM relevance filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer token for the provider. Never written back out.
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Chat-completions endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Request timeout in seconds (0 disables the timeout)
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

/// Configuration for a full fetch → extract → filter → persist run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiftConfig {
    /// Page to pull links from
    #[serde(default = "default_page_url")]
    pub page_url: String,

    /// Where the filtered list is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Page request timeout in seconds (0 disables the timeout)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Relevance filter settings
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_endpoint() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "google/gemini-2.0-flash-thinking-exp-1219:free".to_string()
}

/// Low temperature keeps the filtering close to deterministic
fn default_temperature() -> f64 {
    0.3
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_page_url() -> String {
    "https://natural-resources.canada.ca/energy-efficiency/homes/canada-greener-homes-initiative/24831"
        .to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("filtered_links.json")
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Create a configuration with the given key and default provider settings
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            ..Self::default()
        }
    }
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            page_url: default_page_url(),
            output_path: default_output_path(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            llm: LlmConfig::default(),
        }
    }
}

impl SiftConfig {
    /// Create a new configuration with default values
    pub fn new(page_url: &str) -> Self {
        Self {
            page_url: page_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Overlay values from the process environment, loading `.env` first if present
    pub fn apply_env(&mut self) {
        if let Ok(path) = dotenvy::dotenv() {
            ::log::debug!("Loaded environment from {}", path.display());
        }
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_VAR) {
            self.llm.api_key = key;
        }
        if let Some(endpoint) = lookup(ENDPOINT_VAR).filter(|v| !v.is_empty()) {
            self.llm.endpoint = endpoint;
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.is_empty()) {
            self.llm.model = model;
        }

        if self.llm.api_key.is_empty() {
            ::log::warn!(
                "{} is not set; the LLM provider will likely reject the request",
                API_KEY_VAR
            );
        }
    }
}
