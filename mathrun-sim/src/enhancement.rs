//! Prioritized action items derived from aggregate metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordering weight; higher ranks sort first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Expected effect of addressing an enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enhancement {
    pub priority: Priority,
    pub category: String,
    pub issue: String,
    pub recommendation: String,
    pub implementation: String,
    pub impact: Impact,
}

impl Enhancement {
    pub(crate) fn new(
        priority: Priority,
        category: &str,
        issue: impl Into<String>,
        recommendation: impl Into<String>,
        implementation: impl Into<String>,
        impact: Impact,
    ) -> Self {
        Self {
            priority,
            category: category.to_string(),
            issue: issue.into(),
            recommendation: recommendation.into(),
            implementation: implementation.into(),
            impact,
        }
    }
}

/// Order enhancements by descending priority; ties keep insertion order.
#[must_use]
pub fn rank_enhancements(mut enhancements: Vec<Enhancement>) -> Vec<Enhancement> {
    enhancements.sort_by_key(|e| std::cmp::Reverse(e.priority.rank()));
    enhancements
}
