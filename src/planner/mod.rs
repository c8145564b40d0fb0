//! Planning stage: turns a topic into an ordered list of report sections
//!
//! The model is asked for structured output matching [`SectionPlan`]. Output
//! that does not parse into that shape fails the run; there is no retry.

pub mod parser;
pub mod types;

pub use parser::parse_section_plan;
pub use types::{Section, SectionPlan};

use crate::error::PlannerError;
use crate::provider::{ChatMessage, ChatModel, OutputSchema};
use std::sync::Arc;
use tracing::{debug, info};

pub const PLAN_SCHEMA_NAME: &str = "SectionPlan";

pub struct Planner {
    model: Arc<dyn ChatModel>,
    instruction: String,
    schema: OutputSchema,
}

impl Planner {
    pub fn new(model: Arc<dyn ChatModel>, instruction: impl Into<String>) -> Self {
        Self {
            model,
            instruction: instruction.into(),
            schema: OutputSchema::of::<SectionPlan>(
                PLAN_SCHEMA_NAME,
                "Outline of the report as a list of sections",
            ),
        }
    }

    /// Ask the model for a section plan for `topic`
    pub async fn plan_for(&self, topic: &str) -> Result<SectionPlan, PlannerError> {
        let messages = [
            ChatMessage::system(self.instruction.as_str()),
            ChatMessage::user(format!("Here is the report topic: {}", topic)),
        ];

        debug!("Planning sections with {} ({})", self.model.name(), self.model.model());
        let raw = self.model.complete_structured(&messages, &self.schema).await?;

        let plan = parse_section_plan(&raw)?;
        info!(
            "Planned {} sections: {:?}",
            plan.len(),
            plan.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );
        Ok(plan)
    }
}
