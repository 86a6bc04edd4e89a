use std::fmt::Display;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A report filed against a piece of content.
///
/// Fields are kept as plain strings so that an incomplete report can still be decoded
/// and rejected field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Report {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    /// What kind of entity is being reported, e.g. `post` or `profile`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// The id of the reported entity.
    #[serde(default)]
    pub type_id: String,
    #[serde(default)]
    pub reason: String,
    /// One of the [`ReportStatus`] values, `pending` or `completed`. Only emptiness is
    /// checked on write, so any other value is stored but never shows up in a status
    /// listing.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub creator_id: String,
}

impl Report {
    pub fn has_status(&self, status: ReportStatus) -> bool {
        self.status == status.as_str()
    }
}

/// The statuses reports are listed by. These are the only values a report's `status`
/// is expected to carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Completed => "completed",
        }
    }
}

impl Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_decode_as_empty() {
        let report: Report = serde_json::from_str(r#"{"id": "r1", "type": "post"}"#).unwrap();

        assert_eq!("r1", report.id);
        assert_eq!("post", report.kind);
        assert!(report.reason.is_empty());
    }

    #[test]
    fn status_matches_its_wire_value() {
        let report = Report {
            status: "completed".into(),
            ..Default::default()
        };

        assert!(report.has_status(ReportStatus::Completed));
        assert!(!report.has_status(ReportStatus::Pending));
    }

    #[test]
    fn unknown_status_matches_no_listing() {
        let report = Report {
            status: "garbage".into(),
            ..Default::default()
        };

        assert!(!report.has_status(ReportStatus::Completed));
        assert!(!report.has_status(ReportStatus::Pending));
    }
}
