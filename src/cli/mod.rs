pub mod generate;
pub mod plan;
pub mod schema;
pub mod serve;

use crate::config::Config;
use crate::pipeline::Pipeline;
use crate::prompts::Instructions;
use crate::provider::create_model;
use crate::telemetry::LangSmithSettings;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "termsai")]
#[command(
    author,
    version,
    about = "Plans and writes short explainer reports for a topic with parallel LLM calls"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "termsai.yaml")]
    pub config: PathBuf,

    /// Override the model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Groq API key
    #[arg(long, global = true, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Report runs to LangSmith when truthy
    #[arg(long, global = true, env = "LANGSMITH_TRACING")]
    pub langsmith_tracing: Option<String>,

    /// LangSmith API key
    #[arg(long, global = true, env = "LANGSMITH_API_KEY", hide_env_values = true)]
    pub langsmith_api_key: Option<String>,

    /// LangSmith project receiving traced runs
    #[arg(long, global = true, env = "LANGSMITH_PROJECT")]
    pub langsmith_project: Option<String>,

    /// LangSmith API base URL
    #[arg(long, global = true, env = "LANGSMITH_ENDPOINT")]
    pub langsmith_endpoint: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web UI and JSON API
    Serve(ServeArgs),

    /// Generate a report for a topic and print it
    Generate(GenerateArgs),

    /// Print the section plan for a topic without writing sections
    Plan(PlanArgs),

    /// Print JSON Schema for the config file or the section plan
    Schema(SchemaArgs),
}

#[derive(Parser, Clone)]
pub struct ServeArgs {
    /// Override the listen address (e.g., 0.0.0.0:8000)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Parser, Clone)]
pub struct GenerateArgs {
    /// Topic to explain
    pub topic: String,

    /// Print the full report (plan, sections, timings) as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the report as markdown to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Clone)]
pub struct PlanArgs {
    /// Topic to plan
    pub topic: String,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Clone)]
pub struct SchemaArgs {
    /// Print the section plan schema sent to the model instead of the config schema
    #[arg(long)]
    pub plan: bool,
}

impl GlobalArgs {
    /// Load config and apply CLI overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        debug!("Loading config from {:?}", self.config);
        let mut config = Config::load_or_default(&self.config)?;

        if let Some(model) = &self.model {
            config.provider.model = model.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn langsmith(&self) -> LangSmithSettings {
        LangSmithSettings::new(
            self.langsmith_tracing.as_deref(),
            self.langsmith_api_key.clone(),
            self.langsmith_project.clone(),
            self.langsmith_endpoint.clone(),
        )
    }

    /// Build the pipeline described by the config, environment and flags
    pub fn build_pipeline(&self, config: &Config) -> anyhow::Result<Pipeline> {
        let instructions = Instructions::load(&config.prompts)?;
        let model = create_model(&config.provider, self.api_key.clone())?;
        let tracer = self.langsmith().tracer();

        if let Some(t) = &tracer {
            info!(
                "Tracing runs to LangSmith project '{}' at {}",
                t.project(),
                t.endpoint()
            );
        }
        info!("Using {} model {}", model.name(), model.model());

        Ok(Pipeline::new(model, instructions)
            .with_max_concurrency(config.pipeline.max_concurrency)
            .with_tracer(tracer))
    }
}
