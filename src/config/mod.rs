mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::net::SocketAddr;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            provider: ProviderConfig::default(),
            pipeline: PipelineConfig::default(),
            prompts: PromptsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from a YAML file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.model is empty".to_string()));
        }

        if self.provider.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("provider.endpoint is empty".to_string()));
        }

        if let Some(t) = self.provider.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::Invalid(format!(
                    "provider.temperature {} is outside 0.0..=2.0",
                    t
                )));
            }
        }

        if self.pipeline.max_concurrency == Some(0) {
            return Err(ConfigError::Invalid(
                "pipeline.max_concurrency must be at least 1".to_string(),
            ));
        }

        self.bind_addr()?;

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.bind.parse().map_err(|_| {
            ConfigError::Invalid(format!("server.bind '{}' is not a socket address", self.server.bind))
        })
    }
}
