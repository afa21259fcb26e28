use crate::identity::LabRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The source a student handed in for one task, matched to the lab's task
/// list by 1-based task number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAnswer {
    pub task_number: usize,
    pub source_code: String,
}

impl TaskAnswer {
    pub fn new(task_number: usize, source_code: impl Into<String>) -> Self {
        Self {
            task_number,
            source_code: source_code.into(),
        }
    }
}

/// A student's submission against a lab. Owned by the submission intake,
/// consumed read-only by grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub student_id: i64,
    pub lab: LabRef,
    pub answers: Vec<TaskAnswer>,
    pub submitted_at: DateTime<Utc>,
    /// Derived at intake: strictly after the lab's due date.
    pub is_late: bool,
}

impl Submission {
    pub fn record(
        student_id: i64,
        lab: LabRef,
        answers: Vec<TaskAnswer>,
        submitted_at: DateTime<Utc>,
        due: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            lab,
            answers,
            submitted_at,
            is_late: submitted_at > due,
        }
    }

    pub fn answer_for(&self, task_number: usize) -> Option<&TaskAnswer> {
        self.answers.iter().find(|a| a.task_number == task_number)
    }
}
