use thiserror::Error;

/// Failures while grading a submission against a lab.
///
/// These are contract violations between the grading service and the code
/// runner that captured the learner outputs — a malformed lab can never get
/// this far, and a wrong answer is a result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GradingError {
    /// The runner captured a different number of outputs than the task has
    /// test cases.
    #[error("task {task_number} has {expected} test cases but {got} captured outputs")]
    OutputCountMismatch {
        task_number: usize,
        expected: usize,
        got: usize,
    },

    /// Grading only makes sense against a stored lab with an identity.
    #[error("cannot grade against an unsaved lab")]
    UnsavedLab,
}
