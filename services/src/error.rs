use marker::GradingError;
use model::{LabError, LabRef};
use thiserror::Error;

/// Failures surfaced to the author or the grading caller. Validation
/// errors pass through from the domain untouched; storage rejections are
/// carried verbatim with no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] LabError),

    /// Field-level payload problems (blank titles and the like), already
    /// formatted for the author.
    #[error("{0}")]
    InvalidPayload(String),

    /// The storage collaborator rejected the write.
    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("lab {} not found in course {} / class {}", .0.lab_id, .0.course_id, .0.class_id)]
    NotFound(LabRef),

    #[error("lab is not shared; only shared labs can be cloned")]
    NotShared,

    #[error("only the owning teacher may modify this lab")]
    NotOwner,

    #[error("lab already has submissions; its tasks, test cases and constraints are locked")]
    TasksLocked,

    #[error("lab is not open for submissions")]
    LabNotOpen,

    #[error(transparent)]
    Grading(#[from] GradingError),
}
