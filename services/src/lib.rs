//! Service layer over the lab domain: validate-then-persist lab authoring
//! operations, submission intake, and grading orchestration. Storage is an
//! external collaborator behind [`repository::LabRepository`] — everything
//! here validates in memory first and only then delegates the write.

pub mod error;
pub mod lab_service;
pub mod repository;
pub mod submission_service;

pub use error::ServiceError;
pub use lab_service::{LabService, SaveAction};
pub use repository::{
    InMemoryLabRepository, InMemorySubmissionRepository, LabRepository, StorageError,
    SubmissionRepository,
};
pub use submission_service::SubmissionService;
