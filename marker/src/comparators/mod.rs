//! # Comparators
//!
//! One comparison strategy per test-case mode. All of them implement
//! [`OutputComparator`](crate::traits::comparator::OutputComparator), so the
//! grading loop can pick a strategy per case without caring which mode it
//! is dealing with.
//!
//! - [`exact_comparator`]: equality after trailing-whitespace normalization.
//! - [`contains_comparator`]: expected text must appear in the output.
//! - [`regex_comparator`]: output must match the stored pattern.
//! - [`float_comparator`]: numeric comparison within a configured tolerance.

pub mod contains_comparator;
pub mod exact_comparator;
pub mod float_comparator;
pub mod regex_comparator;

use crate::config::GradingConfig;
use crate::traits::comparator::OutputComparator;
use model::ComparisonMode;

/// Select the comparator implementing a test case's declared mode.
pub fn comparator_for(
    mode: ComparisonMode,
    config: &GradingConfig,
) -> Box<dyn OutputComparator> {
    match mode {
        ComparisonMode::Exact => Box::new(exact_comparator::ExactComparator),
        ComparisonMode::Contains => Box::new(contains_comparator::ContainsComparator),
        ComparisonMode::Regex => Box::new(regex_comparator::RegexComparator),
        ComparisonMode::FloatApprox => Box::new(float_comparator::FloatComparator {
            tolerance: config.float_tolerance,
        }),
    }
}
