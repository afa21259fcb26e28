//! The wire shapes exchanged with the REST backend and the authoring form.
//!
//! These mirror the persisted JSON exactly, open strings and all: comparison
//! modes, construct names and constraint kinds arrive as whatever the form
//! sent. The `from_payload` constructors on the domain types are the
//! boundary where those strings either become closed enum values or get
//! rejected. `startTime`/`dueTime` are redundant display strings kept
//! alongside the real timestamps.

use crate::lab::{Difficulty, LabStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LabPayload {
    #[validate(length(min = 1, max = 200, message = "lab title must be 1-200 characters"))]
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub difficulty: Difficulty,
    pub status: LabStatus,
    pub is_shared: bool,
    /// ISO-8601 timestamps.
    pub start_date: String,
    pub due_date: String,
    /// Local time-of-day display strings, redundant with the timestamps.
    pub start_time: String,
    pub due_time: String,
    /// Declared lab total; must equal the sum of task marks.
    pub marks: u32,
    #[validate]
    pub tasks: Vec<TaskPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[validate(length(min = 1, max = 200, message = "task title must be 1-200 characters"))]
    pub title: String,
    pub description: String,
    pub marks: u32,
    pub test_cases: Vec<TestCasePayload>,
    pub code_constraints: Vec<ConstraintPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCasePayload {
    pub input: String,
    pub expected_output: String,
    /// "Exact" | "Contains" | "Regex" | "Float" — validated on parse.
    pub comparison_mode: String,
    pub is_hidden: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintPayload {
    /// Construct name from the fixed vocabulary — validated on parse.
    pub construct: String,
    /// "Required" | "Forbidden".
    #[serde(rename = "type")]
    pub kind: String,
    pub specifics: DepthBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthBounds {
    pub min_depth: u32,
    pub max_depth: u32,
}
