//! The persistence seam. Real storage lives in an external collaborator;
//! these traits are the whole contract the services hold it to, and the
//! in-memory implementations back the test suites.

use async_trait::async_trait;
use model::{ClassRef, Lab, LabRef, Submission};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;

/// Whatever the storage collaborator said when it rejected an operation,
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StorageError(pub String);

#[async_trait]
pub trait LabRepository: Send + Sync {
    /// Store a new lab. The store assigns the identity; the returned lab
    /// carries it.
    async fn insert(&self, lab: Lab) -> Result<Lab, StorageError>;

    /// Replace a stored lab wholesale. Last write wins; there is no
    /// version check.
    async fn update(&self, lab: &Lab) -> Result<Lab, StorageError>;

    async fn find(&self, lab_ref: &LabRef) -> Result<Option<Lab>, StorageError>;

    /// Returns whether anything was actually removed.
    async fn delete(&self, lab_ref: &LabRef) -> Result<bool, StorageError>;

    async fn list_for_class(&self, class: &ClassRef) -> Result<Vec<Lab>, StorageError>;
}

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, submission: Submission) -> Result<Submission, StorageError>;

    async fn list_for_lab(&self, lab_ref: &LabRef) -> Result<Vec<Submission>, StorageError>;

    async fn count_for_lab(&self, lab_ref: &LabRef) -> Result<usize, StorageError>;
}

/// Hash-map lab store with a monotonic id counter.
#[derive(Default)]
pub struct InMemoryLabRepository {
    labs: Mutex<HashMap<(i64, i64, i64), Lab>>,
    next_id: AtomicI64,
}

impl InMemoryLabRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn key(lab_ref: &LabRef) -> (i64, i64, i64) {
    (lab_ref.course_id, lab_ref.class_id, lab_ref.lab_id)
}

#[async_trait]
impl LabRepository for InMemoryLabRepository {
    async fn insert(&self, lab: Lab) -> Result<Lab, StorageError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = lab.with_id(id);
        let lab_ref = stored
            .lab_ref()
            .ok_or_else(|| StorageError("failed to assign lab id".into()))?;
        let mut labs = self.labs.lock().unwrap_or_else(|e| e.into_inner());
        labs.insert(key(&lab_ref), stored.clone());
        Ok(stored)
    }

    async fn update(&self, lab: &Lab) -> Result<Lab, StorageError> {
        let lab_ref = lab
            .lab_ref()
            .ok_or_else(|| StorageError("cannot update an unsaved lab".into()))?;
        let mut labs = self.labs.lock().unwrap_or_else(|e| e.into_inner());
        match labs.get_mut(&key(&lab_ref)) {
            Some(slot) => {
                *slot = lab.clone();
                Ok(lab.clone())
            }
            None => Err(StorageError(format!("no lab with id {}", lab_ref.lab_id))),
        }
    }

    async fn find(&self, lab_ref: &LabRef) -> Result<Option<Lab>, StorageError> {
        let labs = self.labs.lock().unwrap_or_else(|e| e.into_inner());
        Ok(labs.get(&key(lab_ref)).cloned())
    }

    async fn delete(&self, lab_ref: &LabRef) -> Result<bool, StorageError> {
        let mut labs = self.labs.lock().unwrap_or_else(|e| e.into_inner());
        Ok(labs.remove(&key(lab_ref)).is_some())
    }

    async fn list_for_class(&self, class: &ClassRef) -> Result<Vec<Lab>, StorageError> {
        let labs = self.labs.lock().unwrap_or_else(|e| e.into_inner());
        let mut found: Vec<Lab> = labs
            .values()
            .filter(|lab| lab.class_ref() == *class)
            .cloned()
            .collect();
        found.sort_by_key(|lab| lab.id());
        Ok(found)
    }
}

#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: Mutex<Vec<Submission>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: Submission) -> Result<Submission, StorageError> {
        let mut submissions = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_for_lab(&self, lab_ref: &LabRef) -> Result<Vec<Submission>, StorageError> {
        let submissions = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        Ok(submissions
            .iter()
            .filter(|s| s.lab == *lab_ref)
            .cloned()
            .collect())
    }

    async fn count_for_lab(&self, lab_ref: &LabRef) -> Result<usize, StorageError> {
        let submissions = self.submissions.lock().unwrap_or_else(|e| e.into_inner());
        Ok(submissions.iter().filter(|s| s.lab == *lab_ref).count())
    }
}
