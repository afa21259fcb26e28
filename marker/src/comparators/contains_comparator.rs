//! Substring containment: the expected text must appear somewhere in the
//! learner's output.
//!
//! The documented direction is expected-in-actual — a case passes when the
//! output contains the expected text, however much else it prints around
//! it. The expected text is trimmed first so authors don't have to fight
//! invisible whitespace in the form field.

use crate::traits::comparator::OutputComparator;
use crate::types::CaseOutcome;

pub struct ContainsComparator;

impl OutputComparator for ContainsComparator {
    fn compare(&self, expected: &str, actual: &str) -> CaseOutcome {
        let needle = expected.trim();
        if needle.is_empty() {
            // An empty needle matches anything; treat it as a vacuous pass.
            return CaseOutcome::pass();
        }
        if actual.contains(needle) {
            CaseOutcome::pass()
        } else {
            CaseOutcome::fail()
        }
    }
}
