use crate::error::LabError;
use crate::payload::TestCasePayload;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// How a learner's output is compared against the expected output.
///
/// The wire name for `FloatApprox` is `"Float"`, kept for compatibility
/// with the authoring form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ComparisonMode {
    Exact,
    Contains,
    Regex,
    #[serde(rename = "Float")]
    #[strum(to_string = "Float", serialize = "FloatApprox")]
    FloatApprox,
}

/// One input/expected-output pair for a task.
///
/// Hidden cases are withheld from the learner's view but graded exactly
/// like public ones. `notes` is free text for graders only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
    pub comparison_mode: ComparisonMode,
    pub is_hidden: bool,
    pub notes: Option<String>,
}

impl TestCase {
    pub fn new(
        input: impl Into<String>,
        expected_output: impl Into<String>,
        comparison_mode: ComparisonMode,
    ) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
            comparison_mode,
            is_hidden: false,
            notes: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Parse the wire shape. An unknown comparison mode string is the one
    /// way a test case can be malformed.
    pub fn from_payload(payload: &TestCasePayload) -> Result<Self, LabError> {
        let comparison_mode = ComparisonMode::from_str(&payload.comparison_mode).map_err(|_| {
            LabError::InvalidTestCase(format!(
                "unknown comparison mode \"{}\"",
                payload.comparison_mode
            ))
        })?;
        Ok(Self {
            input: payload.input.clone(),
            expected_output: payload.expected_output.clone(),
            comparison_mode,
            is_hidden: payload.is_hidden,
            notes: if payload.notes.is_empty() {
                None
            } else {
                Some(payload.notes.clone())
            },
        })
    }

    pub fn to_payload(&self) -> TestCasePayload {
        TestCasePayload {
            input: self.input.clone(),
            expected_output: self.expected_output.clone(),
            comparison_mode: self.comparison_mode.to_string(),
            is_hidden: self.is_hidden,
            notes: self.notes.clone().unwrap_or_default(),
        }
    }
}
