use crate::error::LabError;
use crate::identity::{ClassRef, LabRef, TeacherIdentity};
use crate::payload::LabPayload;
use crate::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Lifecycle state of a lab. A lab is saved as `Draft` or directly as
/// `Active`; publishing moves `Draft → Active`. Nothing moves an active lab
/// back, and deletion is an out-of-band removal rather than a state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum LabStatus {
    Draft,
    Active,
}

/// A validated lab definition: scheduling, marks, difficulty, sharing flag
/// and an ordered, non-empty list of tasks.
///
/// A `Lab` can only be obtained through [`Lab::from_payload`], so holding
/// one means every invariant below already held at construction:
///
/// - an assignment target (course + class) was selected,
/// - the schedule parsed and `start < due`,
/// - the task marks sum to `total_marks` exactly,
/// - every task, test case and constraint passed its own checks,
/// - and, for an `Active` lab, every task carries at least one test case.
///
/// `id` is `None` until the store assigns one on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lab {
    id: Option<i64>,
    course_id: i64,
    class_id: i64,
    owner_id: i64,
    title: String,
    description: String,
    instructions: String,
    start: DateTime<Utc>,
    due: DateTime<Utc>,
    total_marks: u32,
    difficulty: Difficulty,
    status: LabStatus,
    is_shared: bool,
    tasks: Vec<Task>,
}

impl Lab {
    /// Run the full pre-persist validation over an authoring payload and
    /// produce a lab, in this order:
    ///
    /// 1. an assignment target must be selected,
    /// 2. both timestamps must parse and `start < due`,
    /// 3. the lab must have tasks and their marks must sum to the declared
    ///    total,
    /// 4. every task must construct cleanly (unknown comparison modes,
    ///    unknown constructs and inverted depth bounds all surface here).
    ///
    /// A payload saved directly as `Active` additionally passes the publish
    /// gate: no task may be without test cases.
    pub fn from_payload(
        target: Option<ClassRef>,
        owner: &TeacherIdentity,
        payload: &LabPayload,
    ) -> Result<Self, LabError> {
        let target = target.ok_or(LabError::MissingAssignmentTarget)?;

        let start = parse_timestamp(&payload.start_date)?;
        let due = parse_timestamp(&payload.due_date)?;
        if start >= due {
            return Err(LabError::InvalidSchedule(format!(
                "due date {} is not after start date {}",
                payload.due_date, payload.start_date
            )));
        }

        if payload.tasks.is_empty() {
            return Err(LabError::EmptyTaskList);
        }

        let sum: u32 = payload.tasks.iter().map(|t| t.marks).sum();
        if sum != payload.marks {
            return Err(LabError::MarksMismatch {
                sum,
                total: payload.marks,
            });
        }

        let tasks = payload
            .tasks
            .iter()
            .map(Task::from_payload)
            .collect::<Result<Vec<_>, _>>()?;

        let lab = Self {
            id: None,
            course_id: target.course_id,
            class_id: target.class_id,
            owner_id: owner.id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            instructions: payload.instructions.clone(),
            start,
            due,
            total_marks: payload.marks,
            difficulty: payload.difficulty,
            status: payload.status,
            is_shared: payload.is_shared,
            tasks,
        };

        if lab.status == LabStatus::Active {
            lab.ensure_publishable()?;
        }

        Ok(lab)
    }

    pub fn to_payload(&self) -> LabPayload {
        LabPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            instructions: self.instructions.clone(),
            difficulty: self.difficulty,
            status: self.status,
            is_shared: self.is_shared,
            start_date: self.start.to_rfc3339(),
            due_date: self.due.to_rfc3339(),
            start_time: self.start.format("%H:%M").to_string(),
            due_time: self.due.format("%H:%M").to_string(),
            marks: self.total_marks,
            tasks: self.tasks.iter().map(Task::to_payload).collect(),
        }
    }

    /// Move `Draft → Active`. Re-publishing an active lab is a no-op, and
    /// the gate is the same either way: every task needs a test case.
    pub fn publish(&mut self) -> Result<(), LabError> {
        self.ensure_publishable()?;
        self.status = LabStatus::Active;
        Ok(())
    }

    fn ensure_publishable(&self) -> Result<(), LabError> {
        for task in &self.tasks {
            if task.test_cases().is_empty() {
                return Err(LabError::TaskWithoutTestCases(task.title().to_string()));
            }
        }
        Ok(())
    }

    /// Deep-copy this lab into another class for another teacher.
    ///
    /// The copy has no identity yet (the store assigns one on insert, which
    /// is also what gives it an empty submission set), `is_shared` is reset,
    /// ownership moves to the acting teacher, and it arrives as a draft so
    /// the new owner schedules and publishes it deliberately. The copy
    /// shares no state with the original.
    pub fn clone_into(&self, target: ClassRef, new_owner: &TeacherIdentity) -> Lab {
        Lab {
            id: None,
            course_id: target.course_id,
            class_id: target.class_id,
            owner_id: new_owner.id,
            title: self.title.clone(),
            description: self.description.clone(),
            instructions: self.instructions.clone(),
            start: self.start,
            due: self.due,
            total_marks: self.total_marks,
            difficulty: self.difficulty,
            status: LabStatus::Draft,
            is_shared: false,
            tasks: self.tasks.clone(),
        }
    }

    /// Identity is store-assigned; repositories call this on insert.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Full `(course, class, lab)` address, once stored.
    pub fn lab_ref(&self) -> Option<LabRef> {
        self.id.map(|lab_id| LabRef {
            course_id: self.course_id,
            class_id: self.class_id,
            lab_id,
        })
    }

    pub fn class_ref(&self) -> ClassRef {
        ClassRef {
            course_id: self.course_id,
            class_id: self.class_id,
        }
    }

    pub fn owner_id(&self) -> i64 {
        self.owner_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn due(&self) -> DateTime<Utc> {
        self.due
    }

    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> LabStatus {
        self.status
    }

    pub fn is_shared(&self) -> bool {
        self.is_shared
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, LabError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| LabError::InvalidSchedule(format!("cannot parse \"{raw}\": {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ConstraintPayload, DepthBounds, TaskPayload, TestCasePayload};

    fn teacher() -> TeacherIdentity {
        TeacherIdentity::new(7, "R. Moyo")
    }

    fn target() -> Option<ClassRef> {
        Some(ClassRef::new(12, 34))
    }

    fn case(expected: &str) -> TestCasePayload {
        TestCasePayload {
            input: "3".into(),
            expected_output: expected.into(),
            comparison_mode: "Exact".into(),
            is_hidden: false,
            notes: String::new(),
        }
    }

    fn task(title: &str, marks: u32) -> TaskPayload {
        TaskPayload {
            title: title.into(),
            description: String::new(),
            marks,
            test_cases: vec![case("9")],
            code_constraints: vec![],
        }
    }

    fn payload(total: u32, tasks: Vec<TaskPayload>) -> LabPayload {
        LabPayload {
            title: "Squares".into(),
            description: "Square the input".into(),
            instructions: "Read n, print n*n".into(),
            difficulty: Difficulty::Easy,
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

    #[test]
    fn test_single_task_matching_total_validates() {
        let lab = Lab::from_payload(target(), &teacher(), &payload(100, vec![task("T1", 100)]))
            .unwrap();
        assert_eq!(lab.total_marks(), 100);
        assert_eq!(lab.status(), LabStatus::Draft);
        assert_eq!(lab.id(), None);
    }

    #[test]
    fn test_marks_mismatch_carries_both_values() {
        let err = Lab::from_payload(
            target(),
            &teacher(),
            &payload(100, vec![task("T1", 40), task("T2", 50)]),
        )
        .unwrap_err();
        assert_eq!(err, LabError::MarksMismatch { sum: 90, total: 100 });
        assert!(err.to_string().contains("90"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_missing_target_rejected_first() {
        // Even an otherwise broken payload reports the missing target.
        let mut p = payload(100, vec![]);
        p.due_date = "not a date".into();
        let err = Lab::from_payload(None, &teacher(), &p).unwrap_err();
        assert_eq!(err, LabError::MissingAssignmentTarget);
    }

    #[test]
    fn test_unparseable_timestamp() {
        let mut p = payload(100, vec![task("T1", 100)]);
        p.start_date = "next tuesday".into();
        assert!(matches!(
            Lab::from_payload(target(), &teacher(), &p),
            Err(LabError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_inverted_schedule() {
        let mut p = payload(100, vec![task("T1", 100)]);
        p.start_date = "2026-03-08T17:00:00Z".into();
        p.due_date = "2026-03-01T08:00:00Z".into();
        assert!(matches!(
            Lab::from_payload(target(), &teacher(), &p),
            Err(LabError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_start_equal_to_due_rejected() {
        let mut p = payload(100, vec![task("T1", 100)]);
        p.due_date = p.start_date.clone();
        assert!(matches!(
            Lab::from_payload(target(), &teacher(), &p),
            Err(LabError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_empty_task_list_rejected() {
        let err = Lab::from_payload(target(), &teacher(), &payload(0, vec![])).unwrap_err();
        assert_eq!(err, LabError::EmptyTaskList);
    }

    #[test]
    fn test_bad_constraint_in_task_propagates() {
        let mut t = task("T1", 100);
        t.code_constraints.push(ConstraintPayload {
            construct: "TernaryOperator".into(),
            kind: "Forbidden".into(),
            specifics: DepthBounds::default(),
        });
        let err = Lab::from_payload(target(), &teacher(), &payload(100, vec![t])).unwrap_err();
        assert!(matches!(err, LabError::InvalidConstraint(_)));
    }

    #[test]
    fn test_active_save_requires_test_cases() {
        let mut t = task("Empty task", 100);
        t.test_cases.clear();
        let mut p = payload(100, vec![t]);
        p.status = LabStatus::Active;
        let err = Lab::from_payload(target(), &teacher(), &p).unwrap_err();
        assert_eq!(err, LabError::TaskWithoutTestCases("Empty task".into()));

        // The same payload saves fine as a draft.
        p.status = LabStatus::Draft;
        assert!(Lab::from_payload(target(), &teacher(), &p).is_ok());
    }

    #[test]
    fn test_publish_draft_with_cases() {
        let mut lab =
            Lab::from_payload(target(), &teacher(), &payload(100, vec![task("T1", 100)]))
                .unwrap();
        lab.publish().unwrap();
        assert_eq!(lab.status(), LabStatus::Active);
    }

    #[test]
    fn test_payload_round_trip() {
        let mut t1 = task("T1", 60);
        t1.test_cases.push(TestCasePayload {
            input: "8".into(),
            expected_output: "64".into(),
            comparison_mode: "Float".into(),
            is_hidden: true,
            notes: "boundary".into(),
        });
        t1.code_constraints.push(ConstraintPayload {
            construct: "ForLoop".into(),
            kind: "Required".into(),
            specifics: DepthBounds { min_depth: 2, max_depth: 0 },
        });
        let original = Lab::from_payload(
            target(),
            &teacher(),
            &payload(100, vec![t1, task("T2", 40)]),
        )
        .unwrap();

        let rebuilt = Lab::from_payload(target(), &teacher(), &original.to_payload()).unwrap();
        assert_eq!(original, rebuilt);
    }

    #[test]
    fn test_clone_resets_identity_ownership_and_sharing() {
        let mut p = payload(100, vec![task("T1", 100)]);
        p.is_shared = true;
        p.status = LabStatus::Active;
        let source = Lab::from_payload(target(), &teacher(), &p)
            .unwrap()
            .with_id(42);

        let other_teacher = TeacherIdentity::new(99, "K. Pillay");
        let copy = source.clone_into(ClassRef::new(12, 77), &other_teacher);

        assert_eq!(copy.id(), None);
        assert_eq!(copy.class_ref(), ClassRef::new(12, 77));
        assert_eq!(copy.owner_id(), 99);
        assert!(!copy.is_shared());
        assert_eq!(copy.status(), LabStatus::Draft);
        assert_eq!(copy.tasks(), source.tasks());

        // Source untouched.
        assert_eq!(source.id(), Some(42));
        assert!(source.is_shared());
        assert_eq!(source.owner_id(), 7);
        assert_eq!(source.status(), LabStatus::Active);
    }
}
