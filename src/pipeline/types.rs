use crate::error::PipelineError;
use crate::planner::SectionPlan;
use serde::Serialize;

/// A non-blank report topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Topic(String);

impl Topic {
    /// Accept any input that is not blank or whitespace-only
    pub fn parse(input: &str) -> Result<Self, PipelineError> {
        if input.trim().is_empty() {
            return Err(PipelineError::BlankTopic);
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prose generated for one planned section
#[derive(Debug, Clone, Serialize)]
pub struct CompletedSection {
    /// Name of the section this text was written for
    pub section: String,
    pub content: String,
    pub elapsed_ms: u64,
}

/// Final output of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub topic: Topic,
    pub plan: SectionPlan,
    /// Completed sections in arrival order
    pub sections: Vec<CompletedSection>,
    /// Section contents joined with the separator
    pub text: String,
    pub elapsed_ms: u64,
}
