use crate::error::WorkerError;
use crate::planner::Section;
use crate::provider::{ChatMessage, ChatModel};
use tracing::debug;

use super::CompletedSection;

/// Write the body text for a single planned section
pub async fn write_section(
    model: &dyn ChatModel,
    instruction: &str,
    section: &Section,
) -> Result<CompletedSection, WorkerError> {
    let start = std::time::Instant::now();

    let messages = [
        ChatMessage::system(instruction),
        ChatMessage::user(format!(
            "Here is the section name: {} and description: {}",
            section.name, section.description
        )),
    ];

    let content = model
        .complete(&messages)
        .await
        .map_err(|e| WorkerError::Provider {
            section: section.name.clone(),
            source: e,
        })?;

    debug!(
        "Section '{}' written in {:?} ({} chars)",
        section.name,
        start.elapsed(),
        content.len()
    );

    Ok(CompletedSection {
        section: section.name.clone(),
        content,
        elapsed_ms: start.elapsed().as_millis() as u64,
    })
}
