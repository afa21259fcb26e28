use serde::{Deserialize, Serialize};

/// Grading-service configuration. The float tolerance deliberately lives
/// here and not in the lab data model: authors declare *that* a case is
/// float-approximate, the service decides *how* approximate.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GradingConfig {
    #[serde(default = "default_float_tolerance")]
    pub float_tolerance: f64,

    /// Disable to skip the static constraint scan entirely (findings list
    /// comes back empty).
    #[serde(default = "default_check_constraints")]
    pub check_constraints: bool,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            float_tolerance: default_float_tolerance(),
            check_constraints: default_check_constraints(),
        }
    }
}

fn default_float_tolerance() -> f64 {
    1e-3
}

fn default_check_constraints() -> bool {
    true
}
