//! Core data structures shared across the grading pipeline.

use crate::scan::ConstraintFinding;
use serde::Serialize;

/// A comparator's verdict for a single test case. `note` carries a short
/// explanation when the verdict needs one (an unparseable float, an invalid
/// regex pattern), not a restatement of pass/fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub passed: bool,
    pub note: Option<String>,
}

impl CaseOutcome {
    pub fn pass() -> Self {
        Self { passed: true, note: None }
    }

    pub fn fail() -> Self {
        Self { passed: false, note: None }
    }

    pub fn fail_with(note: impl Into<String>) -> Self {
        Self {
            passed: false,
            note: Some(note.into()),
        }
    }
}

/// The graded result of one test case within a task. Hidden cases are
/// graded like any other; the flag is carried so report consumers can
/// redact them for learners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseResult {
    pub case_number: usize,
    pub is_hidden: bool,
    pub passed: bool,
    pub note: Option<String>,
}

/// Everything graded for one task: the proportional score, the per-case
/// results, and what the constraint scan found in the submitted source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskGrade {
    pub task_number: usize,
    pub title: String,
    pub earned: u32,
    pub possible: u32,
    pub cases: Vec<CaseResult>,
    pub constraint_findings: Vec<ConstraintFinding>,
}

/// The outputs the external code runner captured for one task, one string
/// per test case, in test-case order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutputs {
    pub task_number: usize,
    pub outputs: Vec<String>,
}

impl TaskOutputs {
    pub fn new(task_number: usize, outputs: Vec<String>) -> Self {
        Self { task_number, outputs }
    }
}
