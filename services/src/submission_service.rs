use crate::error::ServiceError;
use crate::repository::{LabRepository, StorageError, SubmissionRepository};
use chrono::{DateTime, Utc};
use marker::{GradeReport, GradingConfig, GradingJob, TaskOutputs};
use model::{LabRef, Submission, TaskAnswer};
use std::sync::Arc;

/// Submission intake and grading orchestration. Intake stamps the
/// submission time and derives the lateness flag; grading loads the lab
/// read model and hands everything to the marker.
pub struct SubmissionService {
    labs: Arc<dyn LabRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(labs: Arc<dyn LabRepository>, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { labs, submissions }
    }

    /// Record a submission now.
    pub async fn record(
        &self,
        lab_ref: &LabRef,
        student_id: i64,
        answers: Vec<TaskAnswer>,
    ) -> Result<Submission, ServiceError> {
        self.record_at(lab_ref, student_id, answers, Utc::now()).await
    }

    /// Record a submission with an explicit timestamp. Only active labs
    /// accept submissions, and not before their start time; late ones are
    /// accepted and flagged.
    pub async fn record_at(
        &self,
        lab_ref: &LabRef,
        student_id: i64,
        answers: Vec<TaskAnswer>,
        at: DateTime<Utc>,
    ) -> Result<Submission, ServiceError> {
        let lab = self
            .labs
            .find(lab_ref)
            .await
            .map_err(persistence)?
            .ok_or(ServiceError::NotFound(*lab_ref))?;

        if lab.status() != model::LabStatus::Active || at < lab.start() {
            return Err(ServiceError::LabNotOpen);
        }

        let submission = Submission::record(student_id, *lab_ref, answers, at, lab.due());
        let stored = self
            .submissions
            .insert(submission)
            .await
            .map_err(persistence)?;
        log::info!(
            "student {} submitted to lab {}{}",
            student_id,
            lab_ref.lab_id,
            if stored.is_late { " (late)" } else { "" },
        );
        Ok(stored)
    }

    pub async fn list_for_lab(&self, lab_ref: &LabRef) -> Result<Vec<Submission>, ServiceError> {
        self.submissions
            .list_for_lab(lab_ref)
            .await
            .map_err(persistence)
    }

    /// Grade a recorded submission against its lab, given the outputs the
    /// code runner captured.
    pub async fn grade(
        &self,
        submission: &Submission,
        outputs: Vec<TaskOutputs>,
        config: GradingConfig,
    ) -> Result<GradeReport, ServiceError> {
        let lab = self
            .labs
            .find(&submission.lab)
            .await
            .map_err(persistence)?
            .ok_or(ServiceError::NotFound(submission.lab))?;

        let report = GradingJob::new(&lab, submission, outputs)
            .with_config(config)
            .grade()?;
        log::info!(
            "graded submission {} for lab {}: {}%",
            submission.id,
            submission.lab.lab_id,
            report.overall_score,
        );
        Ok(report)
    }
}

fn persistence(err: StorageError) -> ServiceError {
    ServiceError::Persistence(err.to_string())
}
