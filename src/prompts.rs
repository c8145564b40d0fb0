use crate::config::PromptsConfig;
use crate::error::ConfigError;
use std::path::Path;
use tracing::debug;

// Embedded default prompts
const DEFAULT_PLANNER_PROMPT: &str = include_str!("../prompts/planner.md");
const DEFAULT_WORKER_PROMPT: &str = include_str!("../prompts/worker.md");

/// System instructions for the two model roles
#[derive(Debug, Clone)]
pub struct Instructions {
    pub planner: String,
    pub worker: String,
}

impl Default for Instructions {
    fn default() -> Self {
        Self {
            planner: DEFAULT_PLANNER_PROMPT.to_string(),
            worker: DEFAULT_WORKER_PROMPT.to_string(),
        }
    }
}

impl Instructions {
    /// Load configured prompt files, falling back to the embedded prompts
    pub fn load(config: &PromptsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            planner: resolve(config.planner_file.as_deref(), DEFAULT_PLANNER_PROMPT, "planner")?,
            worker: resolve(config.worker_file.as_deref(), DEFAULT_WORKER_PROMPT, "worker")?,
        })
    }
}

fn resolve(path: Option<&Path>, embedded: &str, role: &str) -> Result<String, ConfigError> {
    let Some(path) = path else {
        return Ok(embedded.to_string());
    };

    match std::fs::read_to_string(path) {
        Ok(p) => Ok(p),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                "Prompt file {} not found, using embedded {} prompt",
                path.display(),
                role
            );
            Ok(embedded.to_string())
        }
        Err(e) => Err(ConfigError::ReadPrompt {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
