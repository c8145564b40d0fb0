//! Report pipeline: plan sections, write them concurrently, join the results
//!
//! 1. The planner turns the topic into a [`SectionPlan`](crate::planner::SectionPlan)
//! 2. One writer per section runs concurrently; results arrive in completion order
//! 3. The synthesizer joins the section texts with a fixed `---` separator

mod orchestrator;
mod synthesizer;
mod types;
mod worker;

pub use orchestrator::Pipeline;
pub use synthesizer::synthesize;
pub use types::{CompletedSection, Report, Topic};
