//! Section plan produced by the planner

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named, described unit of report content
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct Section {
    /// Name for this section of the report.
    pub name: String,

    /// Brief overview of the main topics and concepts to be covered in this section.
    pub description: String,
}

/// Sections of the report, in planned order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct SectionPlan {
    /// Sections of the report.
    pub sections: Vec<Section>,
}

impl SectionPlan {
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.description)
    }
}
