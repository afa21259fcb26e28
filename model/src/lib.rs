//! Domain model for lab authoring: the descriptors a teacher's authoring
//! form builds (labs, tasks, test cases, code constraints), the validation
//! rules that must hold before a lab reaches storage, and the submission
//! read model the grading side consumes.
//!
//! Inbound data always enters through [`payload`] and the `from_payload`
//! constructors, which turn the open wire strings into closed vocabularies
//! and reject anything malformed before a lab object can exist.

pub mod constraint;
pub mod error;
pub mod identity;
pub mod lab;
pub mod payload;
pub mod submission;
pub mod task;
pub mod test_case;

pub use constraint::{CodeConstraint, CodeConstruct, ConstraintKind};
pub use error::LabError;
pub use identity::{ClassRef, LabRef, TeacherIdentity};
pub use lab::{Difficulty, Lab, LabStatus};
pub use submission::{Submission, TaskAnswer};
pub use task::Task;
pub use test_case::{ComparisonMode, TestCase};
