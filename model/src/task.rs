use crate::constraint::CodeConstraint;
use crate::error::LabError;
use crate::payload::TaskPayload;
use crate::test_case::TestCase;
use serde::Serialize;

/// A single gradable problem within a lab: its point value, its test cases
/// and its code constraints, both in authoring order.
///
/// Order of test cases and constraints is display order only; grading
/// attaches no meaning to it. Marks carry no task-level upper bound — the
/// lab-level sum invariant is the real constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    title: String,
    description: String,
    marks: u32,
    test_cases: Vec<TestCase>,
    constraints: Vec<CodeConstraint>,
}

impl Task {
    /// A freshly added task starts with no test cases or constraints; the
    /// publish gate is what insists on at least one case later.
    pub fn new(title: impl Into<String>, description: impl Into<String>, marks: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            marks,
            test_cases: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn marks(&self) -> u32 {
        self.marks
    }

    pub fn set_marks(&mut self, marks: u32) {
        self.marks = marks;
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn constraints(&self) -> &[CodeConstraint] {
        &self.constraints
    }

    pub fn add_test_case(&mut self, case: TestCase) {
        self.test_cases.push(case);
    }

    /// Remove the test case at `index`. Refuses to leave the task with
    /// zero cases.
    pub fn remove_test_case(&mut self, index: usize) -> Result<TestCase, LabError> {
        if index >= self.test_cases.len() {
            return Err(LabError::IndexOutOfRange {
                kind: "test case",
                index,
            });
        }
        if self.test_cases.len() == 1 {
            return Err(LabError::CannotRemoveLastTestCase);
        }
        Ok(self.test_cases.remove(index))
    }

    pub fn add_constraint(&mut self, constraint: CodeConstraint) {
        self.constraints.push(constraint);
    }

    pub fn remove_constraint(&mut self, index: usize) -> Result<CodeConstraint, LabError> {
        if index >= self.constraints.len() {
            return Err(LabError::IndexOutOfRange {
                kind: "constraint",
                index,
            });
        }
        Ok(self.constraints.remove(index))
    }

    pub fn from_payload(payload: &TaskPayload) -> Result<Self, LabError> {
        let mut task = Task::new(payload.title.clone(), payload.description.clone(), payload.marks);
        for case in &payload.test_cases {
            task.add_test_case(TestCase::from_payload(case)?);
        }
        for constraint in &payload.code_constraints {
            task.add_constraint(CodeConstraint::from_payload(constraint)?);
        }
        Ok(task)
    }

    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            marks: self.marks,
            test_cases: self.test_cases.iter().map(TestCase::to_payload).collect(),
            code_constraints: self.constraints.iter().map(CodeConstraint::to_payload).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::CodeConstruct;
    use crate::test_case::ComparisonMode;

    fn task_with_cases(n: usize) -> Task {
        let mut task = Task::new("Sum two numbers", "Read two ints, print their sum", 10);
        for i in 0..n {
            task.add_test_case(TestCase::new(
                format!("{i} {i}"),
                format!("{}", i + i),
                ComparisonMode::Exact,
            ));
        }
        task
    }

    #[test]
    fn test_remove_last_test_case_refused() {
        let mut task = task_with_cases(1);
        let err = task.remove_test_case(0).unwrap_err();
        assert_eq!(err, LabError::CannotRemoveLastTestCase);
        assert_eq!(task.test_cases().len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut task = task_with_cases(3);
        let removed = task.remove_test_case(1).unwrap();
        assert_eq!(removed.input, "1 1");
        assert_eq!(task.test_cases()[0].input, "0 0");
        assert_eq!(task.test_cases()[1].input, "2 2");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut task = task_with_cases(2);
        assert!(matches!(
            task.remove_test_case(5),
            Err(LabError::IndexOutOfRange { kind: "test case", index: 5 })
        ));
    }

    #[test]
    fn test_constraint_add_remove() {
        let mut task = task_with_cases(1);
        task.add_constraint(CodeConstraint::required(CodeConstruct::ForLoop));
        task.add_constraint(CodeConstraint::forbidden(CodeConstruct::BuiltInSort));
        let removed = task.remove_constraint(0).unwrap();
        assert_eq!(removed.construct(), CodeConstruct::ForLoop);
        assert_eq!(task.constraints().len(), 1);
        // Unlike test cases, a task may hold zero constraints.
        task.remove_constraint(0).unwrap();
        assert!(task.constraints().is_empty());
    }

    #[test]
    fn test_marks_setter_unbounded_above() {
        let mut task = task_with_cases(1);
        task.set_marks(1_000_000);
        assert_eq!(task.marks(), 1_000_000);
    }

    #[test]
    fn test_payload_round_trip_preserves_order() {
        let mut task = task_with_cases(3);
        task.add_constraint(CodeConstraint::required(CodeConstruct::WhileLoop));
        let back = Task::from_payload(&task.to_payload()).unwrap();
        assert_eq!(task, back);
    }
}
