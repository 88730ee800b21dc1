//! Pre-run checks for a selected app folder.

use crate::folders::AppFolder;

/// Outcome of validating an app's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidation {
    Passed,
    Failed(String),
}

impl ConfigValidation {
    pub fn message(&self) -> String {
        match self {
            Self::Passed => "Config file validation was successful.".to_string(),
            Self::Failed(reason) => format!("Config file validation failed: {reason}"),
        }
    }
}

/// Validate the configuration of the chosen app.
///
/// Only checks that the folder is still present; schema checks are not
/// implemented yet.
pub fn validate_app_config(app: &AppFolder) -> ConfigValidation {
    if app.path.is_dir() {
        ConfigValidation::Passed
    } else {
        ConfigValidation::Failed(format!("app folder {} no longer exists", app.path.display()))
    }
}
