//! Parser for the planner's structured output

use crate::error::PlannerError;
use tracing::debug;

use super::types::SectionPlan;

/// Parse the planner's raw output into a SectionPlan.
///
/// The JSON is located (whole string, fenced block, or first balanced object)
/// and then deserialized as-is. Anything that does not match the section shape
/// is an error; nothing is repaired.
pub fn parse_section_plan(raw: &str) -> Result<SectionPlan, PlannerError> {
    let json_str = extract_json(raw).ok_or_else(|| {
        debug!(
            "No JSON object in planner output: {}...",
            raw.chars().take(200).collect::<String>()
        );
        PlannerError::ParseOutput("no JSON object in planner output".to_string())
    })?;

    let plan: SectionPlan = serde_json::from_str(&json_str)
        .map_err(|e| PlannerError::ParseOutput(e.to_string()))?;

    if plan.is_empty() {
        return Err(PlannerError::EmptyPlan);
    }

    Ok(plan)
}

/// Locate the plan object in the planner's reply.
///
/// Tool-call arguments arrive as bare JSON. When the model answered in plain
/// content instead, the object may sit inside a markdown code fence or after a
/// sentence of preamble.
fn extract_json(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') && is_json(trimmed) {
        return Some(trimmed.to_string());
    }

    let fence = regex::Regex::new(r"```(?:json)?\s*\n?([\s\S]*?)\n?```").ok()?;
    if let Some(body) = fence
        .captures_iter(s)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .find(|body| is_json(body))
    {
        return Some(body.to_string());
    }

    first_object(s).filter(|obj| is_json(obj)).map(str::to_string)
}

fn is_json(candidate: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(candidate).is_ok()
}

/// Slice from the first `{` to its matching `}`; braces inside strings are not special-cased
fn first_object(s: &str) -> Option<&str> {
    let open = s.find('{')?;
    let mut depth = 0usize;
    for (offset, c) in s[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[open..open + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_arguments() {
        let raw = r#"{"sections": [
            {"name": "Definition", "description": "What rate limiting is"},
            {"name": "Example", "description": "A real-world API quota"}
        ]}"#;

        let plan = parse_section_plan(raw).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.sections[0].name, "Definition");
        assert_eq!(plan.sections[1].description, "A real-world API quota");
    }

    #[test]
    fn test_parse_markdown_wrapped() {
        let md = r#"
Here is the outline:

```json
{"sections": [{"name": "Overview", "description": "Short intro"}]}
```
"#;

        let plan = parse_section_plan(md).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.sections[0].name, "Overview");
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let raw = r#"{"sections": [{"name": "A", "description": "a", "order": 1}], "notes": "x"}"#;
        assert_eq!(parse_section_plan(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_description_is_rejected() {
        let raw = r#"{"sections": [{"name": "Definition"}]}"#;
        assert!(matches!(
            parse_section_plan(raw),
            Err(PlannerError::ParseOutput(_))
        ));
    }

    #[test]
    fn test_recursive_shape_is_rejected() {
        let raw = r#"{"sections": [{"name": "Root", "sections": [{"name": "Child"}]}]}"#;
        assert!(parse_section_plan(raw).is_err());
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        assert!(matches!(
            parse_section_plan(r#"{"sections": []}"#),
            Err(PlannerError::EmptyPlan)
        ));
    }

    #[test]
    fn test_object_after_preamble() {
        let raw = r#"Sure, here is the plan: {"sections": [{"name": "Limits", "description": "Per-key quotas"}]} Hope that helps."#;

        let plan = parse_section_plan(raw).unwrap();
        assert_eq!(plan.sections[0].name, "Limits");
    }

    #[test]
    fn test_free_text_is_rejected() {
        assert!(matches!(
            parse_section_plan("I could not come up with a plan."),
            Err(PlannerError::ParseOutput(_))
        ));
    }
}
