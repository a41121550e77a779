//! Generation backend configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external code generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the backend (e.g. an Ollama instance).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name passed to the backend.
    #[serde(default = "default_model")]
    pub model: String,
    /// Hard timeout for a single generation call, in seconds.
    ///
    /// The saga treats a timeout the same as any other backend failure.
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            request_timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "codellama".to_string()
}

fn default_timeout() -> u64 {
    120
}
