#![allow(dead_code)]

use model::payload::{ConstraintPayload, DepthBounds, LabPayload, TaskPayload, TestCasePayload};
use model::{ClassRef, Difficulty, LabStatus, TeacherIdentity};
use services::{
    InMemoryLabRepository, InMemorySubmissionRepository, LabService, SubmissionService,
};
use std::sync::Arc;

pub fn teacher() -> TeacherIdentity {
    TeacherIdentity::new(7, "R. Moyo")
}

pub fn other_teacher() -> TeacherIdentity {
    TeacherIdentity::new(99, "K. Pillay")
}

pub fn class_a() -> ClassRef {
    ClassRef::new(12, 34)
}

pub fn class_b() -> ClassRef {
    ClassRef::new(12, 77)
}

pub fn test_case(expected: &str, mode: &str) -> TestCasePayload {
    TestCasePayload {
        input: String::new(),
        expected_output: expected.into(),
        comparison_mode: mode.into(),
        is_hidden: false,
        notes: String::new(),
    }
}

pub fn task(title: &str, marks: u32) -> TaskPayload {
    TaskPayload {
        title: title.into(),
        description: String::new(),
        marks,
        test_cases: vec![test_case("42", "Exact")],
        code_constraints: vec![],
    }
}

pub fn constraint(construct: &str, kind: &str) -> ConstraintPayload {
    ConstraintPayload {
        construct: construct.into(),
        kind: kind.into(),
        specifics: DepthBounds::default(),
    }
}

pub fn lab_payload(total: u32, tasks: Vec<TaskPayload>) -> LabPayload {
    LabPayload {
        title: "Loops and numbers".into(),
        description: "Weekly lab".into(),
        instructions: "Solve every task.".into(),
        difficulty: Difficulty::Medium,
        status: LabStatus::Draft,
        is_shared: false,
        start_date: "2026-03-01T08:00:00Z".into(),
        due_date: "2026-03-08T17:00:00Z".into(),
        start_time: "08:00".into(),
        due_time: "17:00".into(),
        marks: total,
        tasks,
    }
}

pub struct TestContext {
    pub labs: Arc<InMemoryLabRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
    pub lab_service: LabService,
    pub submission_service: SubmissionService,
}

pub fn context() -> TestContext {
    let labs = Arc::new(InMemoryLabRepository::new());
    let submissions = Arc::new(InMemorySubmissionRepository::new());
    let lab_service = LabService::new(labs.clone(), submissions.clone());
    let submission_service = SubmissionService::new(labs.clone(), submissions.clone());
    TestContext {
        labs,
        submissions,
        lab_service,
        submission_service,
    }
}
