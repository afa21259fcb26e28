//! # Marker Library
//!
//! Grading engine for lab submissions. A submission is graded against the
//! lab definition it was handed in for: every test case of every task is
//! judged under the comparison mode the author declared, task scores are
//! proportional to the passing fraction, and each task's code constraints
//! are checked by static inspection of the submitted source.
//!
//! ## Key Concepts
//! - **GradingJob**: one submission graded against one lab.
//! - **Comparators**: pluggable per-mode strategies for judging a case.
//! - **Construct scan**: heuristic source inspection behind constraints.
//! - **Report**: serializable per-task, per-case results with an envelope.
//!
//! Running learner code is not this crate's job — an external runner
//! captures one output per test case and hands them in as [`TaskOutputs`].

pub mod comparators;
pub mod config;
pub mod error;
pub mod report;
pub mod scan;
pub mod scorer;
pub mod traits;
pub mod types;

pub use config::GradingConfig;
pub use error::GradingError;
pub use report::{GradeReport, GradeReportResponse};
pub use types::TaskOutputs;

use crate::comparators::comparator_for;
use crate::types::{CaseResult, TaskGrade};
use model::{Lab, Submission};

/// A grading job for a single submission.
///
/// Tasks are matched to captured outputs and submitted sources by 1-based
/// task number. A task the runner produced no outputs for scores zero with
/// every case marked failed; a task whose output count disagrees with its
/// test case count is a contract violation and aborts the job.
pub struct GradingJob<'a> {
    lab: &'a Lab,
    submission: &'a Submission,
    outputs: Vec<TaskOutputs>,
    config: GradingConfig,
}

impl<'a> GradingJob<'a> {
    pub fn new(lab: &'a Lab, submission: &'a Submission, outputs: Vec<TaskOutputs>) -> Self {
        Self {
            lab,
            submission,
            outputs,
            config: GradingConfig::default(),
        }
    }

    /// Override the grading-service configuration (float tolerance,
    /// constraint scanning) for this job.
    pub fn with_config(mut self, config: GradingConfig) -> Self {
        self.config = config;
        self
    }

    /// Grade every task and assemble the report.
    pub fn grade(self) -> Result<GradeReport, GradingError> {
        let lab_ref = self.lab.lab_ref().ok_or(GradingError::UnsavedLab)?;

        let mut grades: Vec<TaskGrade> = Vec::new();
        for (index, task) in self.lab.tasks().iter().enumerate() {
            let task_number = index + 1;
            let captured = self
                .outputs
                .iter()
                .find(|o| o.task_number == task_number);

            let cases: Vec<CaseResult> = match captured {
                Some(outputs) => {
                    if outputs.outputs.len() != task.test_cases().len() {
                        return Err(GradingError::OutputCountMismatch {
                            task_number,
                            expected: task.test_cases().len(),
                            got: outputs.outputs.len(),
                        });
                    }
                    task.test_cases()
                        .iter()
                        .zip(&outputs.outputs)
                        .enumerate()
                        .map(|(case_index, (case, actual))| {
                            let comparator =
                                comparator_for(case.comparison_mode, &self.config);
                            let outcome = comparator.compare(&case.expected_output, actual);
                            CaseResult {
                                case_number: case_index + 1,
                                is_hidden: case.is_hidden,
                                passed: outcome.passed,
                                note: outcome.note,
                            }
                        })
                        .collect()
                }
                None => task
                    .test_cases()
                    .iter()
                    .enumerate()
                    .map(|(case_index, case)| CaseResult {
                        case_number: case_index + 1,
                        is_hidden: case.is_hidden,
                        passed: false,
                        note: Some("no output captured for this task".into()),
                    })
                    .collect(),
            };

            let earned = scorer::task_score(task.marks(), &cases);
            let constraint_findings = if self.config.check_constraints {
                let source = self
                    .submission
                    .answer_for(task_number)
                    .map(|a| a.source_code.as_str())
                    .unwrap_or("");
                scan::evaluate_all(source, task.constraints())
            } else {
                Vec::new()
            };

            tracing::debug!(
                task_number,
                earned,
                possible = task.marks(),
                "graded task"
            );

            grades.push(TaskGrade {
                task_number,
                title: task.title().to_string(),
                earned,
                possible: task.marks(),
                cases,
                constraint_findings,
            });
        }

        let overall_score = scorer::overall_percentage(&grades);
        let earned = grades.iter().map(|g| g.earned).sum();
        let possible = grades.iter().map(|g| g.possible).sum();

        Ok(GradeReport {
            submission_id: self.submission.id.to_string(),
            student_id: self.submission.student_id,
            lab: lab_ref,
            is_late: self.submission.is_late,
            overall_score,
            earned,
            possible,
            tasks: grades,
        })
    }
}
