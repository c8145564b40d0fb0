use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to read prompt file '{path}': {source}")]
    ReadPrompt {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No API key configured (set GROQ_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to parse section plan: {0}")]
    ParseOutput(String),

    #[error("Planner returned no sections")]
    EmptyPlan,
}

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Section '{section}' failed: {source}")]
    Provider {
        section: String,
        #[source]
        source: ProviderError,
    },
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Please enter a query before searching.")]
    BlankTopic,

    #[error("Planning failed: {0}")]
    Planner(#[from] PlannerError),

    #[error("Worker failed: {0}")]
    Worker(#[from] WorkerError),

    #[error("Failed to acquire semaphore: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(std::io::Error),
}
