pub mod config;
pub mod logger;

use validator::ValidationErrors;

/// Flatten validator errors into a single author-facing message, one clause
/// per failed field.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    for errs in errors.field_errors().values() {
        for e in errs.iter() {
            if let Some(m) = &e.message {
                messages.push(m.to_string());
            }
        }
    }
    messages.join("; ")
}
