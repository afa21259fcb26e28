use crate::error::ServiceError;
use crate::repository::{LabRepository, StorageError, SubmissionRepository};
use common::format_validation_errors;
use model::payload::LabPayload;
use model::{ClassRef, Lab, LabRef, LabStatus, TeacherIdentity};
use std::sync::Arc;
use validator::Validate;

/// Which save button the author pressed. "Save as Draft" keeps (or leaves)
/// the lab in draft; "Create/Update Lab" makes it active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Draft,
    Publish,
}

/// Authoring operations on labs. Every write runs the full domain
/// validation first; nothing partial ever reaches the store.
pub struct LabService {
    labs: Arc<dyn LabRepository>,
    submissions: Arc<dyn SubmissionRepository>,
}

impl LabService {
    pub fn new(labs: Arc<dyn LabRepository>, submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { labs, submissions }
    }

    /// Validate and store a new lab in the target class. The acting teacher
    /// becomes the owner and the store assigns the lab id.
    pub async fn create_lab(
        &self,
        target: Option<ClassRef>,
        owner: &TeacherIdentity,
        payload: &LabPayload,
        action: SaveAction,
    ) -> Result<Lab, ServiceError> {
        payload
            .validate()
            .map_err(|e| ServiceError::InvalidPayload(format_validation_errors(&e)))?;

        let mut payload = payload.clone();
        payload.status = match action {
            SaveAction::Draft => LabStatus::Draft,
            SaveAction::Publish => LabStatus::Active,
        };

        let lab = Lab::from_payload(target, owner, &payload)?;
        let stored = self.labs.insert(lab).await.map_err(persistence)?;
        log::info!(
            "teacher {} created lab {} ({:?}) in course {} / class {}",
            owner.id,
            stored.title(),
            stored.status(),
            stored.class_ref().course_id,
            stored.class_ref().class_id,
        );
        Ok(stored)
    }

    /// Replace a stored lab with a re-validated version of the payload.
    /// Runs the exact same validation as creation. Once a lab has
    /// submissions, its task structure is locked: only the surrounding
    /// fields (title, schedule, difficulty, sharing) may still change.
    pub async fn update_lab(
        &self,
        lab_ref: &LabRef,
        actor: &TeacherIdentity,
        payload: &LabPayload,
        action: SaveAction,
    ) -> Result<Lab, ServiceError> {
        let existing = self.require(lab_ref).await?;
        if existing.owner_id() != actor.id {
            return Err(ServiceError::NotOwner);
        }

        payload
            .validate()
            .map_err(|e| ServiceError::InvalidPayload(format_validation_errors(&e)))?;

        let mut payload = payload.clone();
        // An active lab never drops back to draft; "Save as Draft" on one
        // just keeps it active.
        payload.status = match action {
            SaveAction::Publish => LabStatus::Active,
            SaveAction::Draft => existing.status(),
        };

        let candidate = Lab::from_payload(Some(lab_ref.class()), actor, &payload)?
            .with_id(lab_ref.lab_id);

        let submission_count = self
            .submissions
            .count_for_lab(lab_ref)
            .await
            .map_err(persistence)?;
        if submission_count > 0 && existing.to_payload().tasks != payload.tasks {
            return Err(ServiceError::TasksLocked);
        }

        let stored = self.labs.update(&candidate).await.map_err(persistence)?;
        log::info!("teacher {} updated lab {}", actor.id, lab_ref.lab_id);
        Ok(stored)
    }

    /// Move a draft to active. Re-publishing an active lab is a no-op.
    pub async fn publish_lab(
        &self,
        lab_ref: &LabRef,
        actor: &TeacherIdentity,
    ) -> Result<Lab, ServiceError> {
        let mut lab = self.require(lab_ref).await?;
        if lab.owner_id() != actor.id {
            return Err(ServiceError::NotOwner);
        }
        lab.publish()?;
        let stored = self.labs.update(&lab).await.map_err(persistence)?;
        log::info!("teacher {} published lab {}", actor.id, lab_ref.lab_id);
        Ok(stored)
    }

    pub async fn delete_lab(
        &self,
        lab_ref: &LabRef,
        actor: &TeacherIdentity,
    ) -> Result<(), ServiceError> {
        let lab = self.require(lab_ref).await?;
        if lab.owner_id() != actor.id {
            return Err(ServiceError::NotOwner);
        }
        let removed = self.labs.delete(lab_ref).await.map_err(persistence)?;
        if !removed {
            return Err(ServiceError::NotFound(*lab_ref));
        }
        log::info!("teacher {} deleted lab {}", actor.id, lab_ref.lab_id);
        Ok(())
    }

    /// Copy a shared lab into another class for the acting teacher. The
    /// copy is an independent create: fresh identity, no submissions,
    /// sharing reset, new ownership.
    pub async fn clone_lab(
        &self,
        source: &LabRef,
        target: ClassRef,
        teacher: &TeacherIdentity,
    ) -> Result<Lab, ServiceError> {
        let source_lab = self.require(source).await?;
        if !source_lab.is_shared() {
            return Err(ServiceError::NotShared);
        }
        let copy = source_lab.clone_into(target, teacher);
        let stored = self.labs.insert(copy).await.map_err(persistence)?;
        log::info!(
            "teacher {} cloned lab {} into course {} / class {}",
            teacher.id,
            source.lab_id,
            target.course_id,
            target.class_id,
        );
        Ok(stored)
    }

    pub async fn get_lab(&self, lab_ref: &LabRef) -> Result<Lab, ServiceError> {
        self.require(lab_ref).await
    }

    pub async fn list_labs(&self, class: &ClassRef) -> Result<Vec<Lab>, ServiceError> {
        self.labs.list_for_class(class).await.map_err(persistence)
    }

    async fn require(&self, lab_ref: &LabRef) -> Result<Lab, ServiceError> {
        self.labs
            .find(lab_ref)
            .await
            .map_err(persistence)?
            .ok_or(ServiceError::NotFound(*lab_ref))
    }
}

fn persistence(err: StorageError) -> ServiceError {
    ServiceError::Persistence(err.to_string())
}
