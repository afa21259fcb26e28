//! Numeric comparison within an absolute tolerance.
//!
//! Both sides are parsed as `f64` after trimming. The tolerance comes from
//! [`GradingConfig`](crate::config::GradingConfig), not from the lab — the
//! author only declares that a case is float-approximate.

use crate::traits::comparator::OutputComparator;
use crate::types::CaseOutcome;

pub struct FloatComparator {
    pub tolerance: f64,
}

impl OutputComparator for FloatComparator {
    fn compare(&self, expected: &str, actual: &str) -> CaseOutcome {
        let expected_value: f64 = match expected.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                return CaseOutcome::fail_with(format!(
                    "expected output \"{}\" is not a number",
                    expected.trim()
                ));
            }
        };
        let actual_value: f64 = match actual.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                return CaseOutcome::fail_with(format!(
                    "output \"{}\" is not a number",
                    actual.trim()
                ));
            }
        };

        if (actual_value - expected_value).abs() <= self.tolerance {
            CaseOutcome::pass()
        } else {
            CaseOutcome::fail()
        }
    }
}
