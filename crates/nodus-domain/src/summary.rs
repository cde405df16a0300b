//! Executive summary module

use crate::validation::{
    optional_field, required_field, MAX_KEY_POINT_LENGTH, MAX_SUMMARY_LENGTH,
};
use crate::SchemaError;
use serde::{Deserialize, Serialize};

/// Section headings the summary prose is expected to contain, in order.
pub const SUMMARY_SECTIONS: [&str; 5] = [
    "Overview:",
    "Key Entities and Roles:",
    "Decisions and Actions:",
    "Key Relationships:",
    "Risks and Constraints:",
];

/// High-level executive summary of an input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawExecutiveSummary")]
pub struct ExecutiveSummary {
    summary: String,
    key_points: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct RawExecutiveSummary {
    summary: String,
    #[serde(default)]
    key_points: Option<Vec<String>>,
}

impl ExecutiveSummary {
    /// Create a validated summary.
    ///
    /// Key points are trimmed; blank entries are dropped.
    pub fn new(summary: &str, key_points: Option<Vec<String>>) -> Result<Self, SchemaError> {
        let summary = required_field("summary", summary, MAX_SUMMARY_LENGTH)?;

        let key_points = match key_points {
            Some(points) => {
                let mut cleaned = Vec::with_capacity(points.len());
                for point in &points {
                    if let Some(point) =
                        optional_field("key_points", Some(point), MAX_KEY_POINT_LENGTH)?
                    {
                        cleaned.push(point);
                    }
                }
                Some(cleaned)
            }
            None => None,
        };

        Ok(Self {
            summary,
            key_points,
        })
    }

    /// The structured summary prose
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Bullet-style key points, if the model produced any
    pub fn key_points(&self) -> Option<&[String]> {
        self.key_points.as_deref()
    }

    /// Section headings from [`SUMMARY_SECTIONS`] that do not appear in the prose
    pub fn missing_sections(&self) -> Vec<&'static str> {
        SUMMARY_SECTIONS
            .iter()
            .copied()
            .filter(|heading| !self.summary.contains(heading))
            .collect()
    }

    /// Plain-text rendering: the prose followed by a `Key Points:` list.
    pub fn to_plain_text(&self) -> String {
        let mut text = self.summary.clone();
        if let Some(points) = self.key_points().filter(|p| !p.is_empty()) {
            text.push_str("\n\nKey Points:\n");
            let bullets: Vec<String> = points.iter().map(|p| format!("- {}", p)).collect();
            text.push_str(&bullets.join("\n"));
        }
        text
    }
}

impl TryFrom<RawExecutiveSummary> for ExecutiveSummary {
    type Error = SchemaError;

    fn try_from(raw: RawExecutiveSummary) -> Result<Self, Self::Error> {
        ExecutiveSummary::new(&raw.summary, raw.key_points)
    }
}
