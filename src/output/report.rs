use crate::error::OutputError;
use crate::pipeline::Report;
use std::fs;
use std::path::Path;

/// Render a report as a markdown document headed by its topic
pub fn render_markdown(report: &Report) -> String {
    let mut content = String::new();
    content.push_str(&format!("# {}\n\n", report.topic.as_str().trim()));
    content.push_str(&report.text);
    if !report.text.ends_with('\n') {
        content.push('\n');
    }
    content
}

/// Write the report as markdown, creating parent directories as needed
pub fn write_report(path: &Path, report: &Report) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(OutputError::CreateDir)?;
    }
    fs::write(path, render_markdown(report)).map_err(OutputError::WriteReport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{synthesize, CompletedSection, Topic};
    use crate::planner::{Section, SectionPlan};

    fn sample_report() -> Report {
        let sections = vec![
            CompletedSection {
                section: "Definition".to_string(),
                content: "**Rate limiting** caps request volume.".to_string(),
                elapsed_ms: 12,
            },
            CompletedSection {
                section: "Example".to_string(),
                content: "GitHub allows 5,000 requests per hour.".to_string(),
                elapsed_ms: 15,
            },
        ];
        let text = synthesize(
            &sections
                .iter()
                .map(|s| s.content.as_str())
                .collect::<Vec<_>>(),
        );
        Report {
            topic: Topic::parse(" API rate limiting").unwrap(),
            plan: SectionPlan {
                sections: vec![
                    Section {
                        name: "Definition".to_string(),
                        description: "d".to_string(),
                    },
                    Section {
                        name: "Example".to_string(),
                        description: "e".to_string(),
                    },
                ],
            },
            sections,
            text,
            elapsed_ms: 30,
        }
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(&sample_report());
        assert!(md.starts_with("# API rate limiting\n\n**Rate limiting**"));
        assert!(md.contains("\n\n---\n\nGitHub allows"));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn test_write_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/2026/rate-limiting.md");

        write_report(&path, &sample_report()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_markdown(&sample_report()));
    }
}
