//! Pattern matching: the case's expected output holds a regular expression
//! the learner's output must match.
//!
//! An author can save a lab with a pattern that later fails to compile
//! (the data model does not parse patterns at authoring time), so an
//! invalid pattern fails the case with a note instead of failing the
//! grading run.

use crate::traits::comparator::OutputComparator;
use crate::types::CaseOutcome;
use regex::Regex;

pub struct RegexComparator;

impl OutputComparator for RegexComparator {
    fn compare(&self, expected: &str, actual: &str) -> CaseOutcome {
        let regex = match Regex::new(expected) {
            Ok(re) => re,
            Err(_) => {
                return CaseOutcome::fail_with(format!("invalid regex pattern: {expected}"));
            }
        };

        if regex.is_match(actual) {
            CaseOutcome::pass()
        } else {
            CaseOutcome::fail()
        }
    }
}
