//! Class and subject models.
//!
//! Both are plain records. Subjects are consumed for display only and never
//! take part in feasibility decisions.

use serde::{Deserialize, Serialize};

/// A class (group of students) that attends sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    /// Unique class identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl SchoolClass {
    /// Creates a class.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A taught subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Color tag used by renderers (e.g. `"#4f46e5"`).
    #[serde(default)]
    pub color: String,
    /// Suggested weekly count for new assignments. Advisory only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_quota: Option<u32>,
}

impl Subject {
    /// Creates a subject with no color and no default quota.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            default_quota: None,
        }
    }

    /// Sets the color tag.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the default weekly quota.
    pub fn with_default_quota(mut self, quota: u32) -> Self {
        self.default_quota = Some(quota);
        self
    }
}
