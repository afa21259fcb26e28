use thiserror::Error;

/// Everything that can go wrong while assembling or validating a lab.
///
/// All variants are authoring-time and locally recoverable: they are
/// reported back to the author and block the save, nothing is fatal to the
/// process. Storage-side failures live in the service layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabError {
    /// Unknown construct name, unknown kind, or inverted depth bounds.
    #[error("invalid code constraint: {0}")]
    InvalidConstraint(String),

    /// Unknown comparison mode or otherwise malformed test case.
    #[error("invalid test case: {0}")]
    InvalidTestCase(String),

    /// No course and class were selected for the lab.
    #[error("no course and class selected for this lab")]
    MissingAssignmentTarget,

    /// Start/due timestamps failed to parse, or due is not after start.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// The sum of task marks does not equal the declared lab total. Both
    /// values are carried so the author can self-correct.
    #[error("task marks add up to {sum}, but the lab total is {total}")]
    MarksMismatch { sum: u32, total: u32 },

    /// Removing this test case would leave the task with none.
    #[error("a task must keep at least one test case")]
    CannotRemoveLastTestCase,

    /// A lab must contain at least one task.
    #[error("a lab must contain at least one task")]
    EmptyTaskList,

    /// A lab cannot become active while a task has no test cases.
    #[error("task \"{0}\" has no test cases yet")]
    TaskWithoutTestCases(String),

    /// Index-based removal pointed past the end of the list.
    #[error("no {kind} at index {index}")]
    IndexOutOfRange { kind: &'static str, index: usize },
}
