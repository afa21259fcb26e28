use serde::{Deserialize, Serialize};

/// The class a lab is assigned to. Creation and cloning target one of
/// these; the course/class aggregate itself is owned elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassRef {
    pub course_id: i64,
    pub class_id: i64,
}

impl ClassRef {
    pub fn new(course_id: i64, class_id: i64) -> Self {
        Self { course_id, class_id }
    }

    pub fn lab(&self, lab_id: i64) -> LabRef {
        LabRef {
            course_id: self.course_id,
            class_id: self.class_id,
            lab_id,
        }
    }
}

/// Full address of a stored lab: `(course, class, lab)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabRef {
    pub course_id: i64,
    pub class_id: i64,
    pub lab_id: i64,
}

impl LabRef {
    pub fn class(&self) -> ClassRef {
        ClassRef {
            course_id: self.course_id,
            class_id: self.class_id,
        }
    }
}

/// The teacher performing an operation. Always passed explicitly to create
/// and clone calls — never read from ambient session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherIdentity {
    pub id: i64,
    pub full_name: String,
}

impl TeacherIdentity {
    pub fn new(id: i64, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }
}
