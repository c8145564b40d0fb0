use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub prompts: PromptsConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Chat-completion endpoint settings. The API key is never read from this file.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ProviderConfig {
    /// OpenAI-compatible chat completions URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (0.0 - 2.0); provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Per-request timeout; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_sec: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: None,
            timeout_sec: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PipelineConfig {
    /// Upper bound on concurrent section writers; unbounded when unset
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct PromptsConfig {
    /// Replaces the built-in planner instruction
    #[serde(default)]
    pub planner_file: Option<PathBuf>,

    /// Replaces the built-in section writer instruction
    #[serde(default)]
    pub worker_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}
