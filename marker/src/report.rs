//! The serializable grading report and its response envelope.
//!
//! [`GradeReport`] is the read model the submissions view consumes: per-task
//! scores with per-case detail and constraint findings, plus the overall
//! percentage and the lateness flag derived at intake. Consumers rendering
//! for learners are expected to redact cases flagged `is_hidden`; graders
//! see everything.

use crate::types::TaskGrade;
use model::LabRef;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GradeReport {
    pub submission_id: String,
    pub student_id: i64,
    pub lab: LabRef,
    pub is_late: bool,
    /// Overall score as a percentage (0-100).
    pub overall_score: u32,
    pub earned: u32,
    pub possible: u32,
    pub tasks: Vec<TaskGrade>,
}

/// Response envelope wrapping a report with the `success`/`message` fields
/// the rest of the platform's API responses carry.
#[derive(Debug, Serialize)]
pub struct GradeReportResponse {
    success: bool,
    message: String,
    data: GradeReport,
}

impl From<GradeReport> for GradeReportResponse {
    fn from(report: GradeReport) -> Self {
        GradeReportResponse {
            success: true,
            message: "Grading complete.".to_string(),
            data: report,
        }
    }
}
