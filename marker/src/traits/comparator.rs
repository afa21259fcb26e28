use crate::types::CaseOutcome;

/// Strategy trait for judging one test case.
///
/// Each comparison mode a test case can declare is one implementation.
/// `expected` is the case's stored expected output (a literal, a substring,
/// a pattern or a number, depending on the mode) and `actual` is whatever
/// the learner's program printed for that case's input.
pub trait OutputComparator: Send + Sync {
    fn compare(&self, expected: &str, actual: &str) -> CaseOutcome;
}
