use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::{env, fs};

/// Process-wide configuration for the lab core, loaded once from the
/// environment. Call [`Config::init`] at startup, then [`Config::get`]
/// anywhere else.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    /// Absolute tolerance used by float-approximate test case grading.
    pub float_tolerance: f64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    pub fn init(env_path: &str) -> &'static Self {
        dotenvy::from_filename(env_path).ok();

        CONFIG.get_or_init(|| {
            let project_name =
                env::var("PROJECT_NAME").unwrap_or_else(|_| "codezy-lab-core".into());
            let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
            let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/lab-core.log".into());
            let float_tolerance = env::var("FLOAT_TOLERANCE")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(1e-3);

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                fs::create_dir_all(parent).expect("Failed to create log directory");
            }

            Config {
                project_name,
                log_level,
                log_file,
                float_tolerance,
            }
        })
    }

    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }
}
