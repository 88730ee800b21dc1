//! Configuration loading and validation.
//!
//! Settings come from an optional TOML file and from the process environment
//! (after `.env` has been loaded). Environment values override file values.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::confluence::ConfluenceConfig;
use crate::constants;
use crate::errors::ConfigError;

/// Optional on-disk configuration.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    /// Directory containing the `<id>_<name>` app folders.
    #[serde(default)]
    pub apps_folder: Option<PathBuf>,
    /// Base URL of the Confluence space pages are fetched from.
    #[serde(default)]
    pub confluence_url: Option<String>,
    /// Bearer token for the Confluence REST API.
    #[serde(default)]
    pub confluence_api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Role labels tried, in order, for the main developer lookup.
    #[serde(default)]
    pub role_keywords: Option<Vec<String>>,
}

impl FileConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Fully resolved application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub apps_folder: PathBuf,
    pub confluence_url: String,
    pub confluence_api_key: String,
    pub request_timeout: Duration,
    pub role_keywords: Vec<String>,
}

impl Settings {
    /// Resolve settings from the process environment and an optional config file.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |name| env::var(name).ok())
    }

    /// Merge file values with values from `lookup`, which takes precedence.
    ///
    /// Empty strings count as missing. All missing required values are
    /// reported together.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |name: &str, fallback: Option<String>| {
            lookup(name)
                .or(fallback)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let apps_folder = pick(
            constants::env::APPS_FOLDER,
            file.apps_folder.map(|p| p.to_string_lossy().into_owned()),
        );
        let confluence_url = pick(constants::env::CONFLUENCE_PAGE, file.confluence_url);
        let confluence_api_key = pick(constants::env::CONFLUENCE_API_KEY, file.confluence_api_key);

        let missing: Vec<String> = [
            (constants::env::APPS_FOLDER, apps_folder.is_none()),
            (constants::env::CONFLUENCE_PAGE, confluence_url.is_none()),
            (constants::env::CONFLUENCE_API_KEY, confluence_api_key.is_none()),
        ]
        .into_iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| name.to_string())
        .collect();

        let (Some(apps_folder), Some(confluence_url), Some(confluence_api_key)) =
            (apps_folder, confluence_url, confluence_api_key)
        else {
            return Err(ConfigError::MissingValues(missing));
        };

        let timeout_secs = match lookup(constants::env::CONFLUENCE_TIMEOUT_SECS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: constants::env::CONFLUENCE_TIMEOUT_SECS.to_string(),
                    message: format!("expected a positive number of seconds, got '{raw}'"),
                })?,
            None => match file.request_timeout_secs {
                Some(0) => {
                    return Err(ConfigError::InvalidValue {
                        name: "request_timeout_secs".to_string(),
                        message: "expected a positive number of seconds, got '0'".to_string(),
                    });
                }
                Some(secs) => secs,
                None => constants::api::REQUEST_TIMEOUT_SECS,
            },
        };

        let role_keywords = file.role_keywords.unwrap_or_else(|| {
            constants::markup::MAIN_DEVELOPER_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect()
        });

        crate::validation::validate_base_url(&confluence_url).map_err(|e| {
            ConfigError::InvalidValue {
                name: constants::env::CONFLUENCE_PAGE.to_string(),
                message: e.to_string(),
            }
        })?;
        crate::validation::validate_token(&confluence_api_key).map_err(|e| {
            ConfigError::InvalidValue {
                name: constants::env::CONFLUENCE_API_KEY.to_string(),
                message: e.to_string(),
            }
        })?;
        crate::validation::validate_role_keywords(&role_keywords).map_err(|e| {
            ConfigError::InvalidValue {
                name: "role_keywords".to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            apps_folder: PathBuf::from(apps_folder),
            confluence_url,
            confluence_api_key,
            request_timeout: Duration::from_secs(timeout_secs),
            role_keywords,
        })
    }

    /// Connection details for the Confluence client.
    pub fn confluence(&self) -> ConfluenceConfig {
        ConfluenceConfig::new(&self.confluence_url, &self.confluence_api_key)
            .with_timeout(self.request_timeout)
    }

    /// The API key with all but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.confluence_api_key.chars().collect();
        let visible = chars.len().saturating_sub(4);
        chars
            .iter()
            .enumerate()
            .map(|(idx, c)| if idx < visible { '•' } else { *c })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn full_env() -> impl Fn(&str) -> Option<String> {
        env_of(&[
            ("APPS_FOLDER", "/srv/apps"),
            ("CONFLUENCE_PAGE", "https://wiki.example.com"),
            ("CONFLUENCE_API_KEY", "secret-token-1234"),
        ])
    }

    #[test]
    fn test_resolve_from_environment() {
        let settings = Settings::resolve(FileConfig::default(), full_env()).unwrap();
        assert_eq!(settings.apps_folder, PathBuf::from("/srv/apps"));
        assert_eq!(settings.confluence_url, "https://wiki.example.com");
        assert_eq!(settings.confluence_api_key, "secret-token-1234");
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.role_keywords, vec!["Developer:", "Main Developer:"]);
    }

    #[test]
    fn test_resolve_reports_all_missing_values() {
        let err = Settings::resolve(
            FileConfig::default(),
            env_of(&[("CONFLUENCE_PAGE", "https://wiki.example.com")]),
        )
        .unwrap_err();

        match err {
            ConfigError::MissingValues(names) => {
                assert_eq!(names, vec!["APPS_FOLDER", "CONFLUENCE_API_KEY"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_treats_empty_values_as_missing() {
        let err = Settings::resolve(
            FileConfig::default(),
            env_of(&[
                ("APPS_FOLDER", "/srv/apps"),
                ("CONFLUENCE_PAGE", "https://wiki.example.com"),
                ("CONFLUENCE_API_KEY", "  "),
            ]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("CONFLUENCE_API_KEY"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = FileConfig {
            apps_folder: Some(PathBuf::from("/from/file")),
            confluence_url: Some("https://file.example.com".to_string()),
            confluence_api_key: Some("file-token".to_string()),
            request_timeout_secs: Some(30),
            role_keywords: Some(vec!["Owner:".to_string()]),
        };
        let settings = Settings::resolve(
            file,
            env_of(&[("CONFLUENCE_PAGE", "https://env.example.com")]),
        )
        .unwrap();

        assert_eq!(settings.apps_folder, PathBuf::from("/from/file"));
        assert_eq!(settings.confluence_url, "https://env.example.com");
        assert_eq!(settings.confluence_api_key, "file-token");
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.role_keywords, vec!["Owner:"]);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let lookup = |name: &str| match name {
            "CONFLUENCE_TIMEOUT_SECS" => Some("soon".to_string()),
            other => full_env()(other),
        };
        let err = Settings::resolve(FileConfig::default(), lookup).unwrap_err();
        assert!(err.to_string().contains("CONFLUENCE_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_timeout_in_file_is_rejected() {
        let file = FileConfig {
            request_timeout_secs: Some(0),
            ..FileConfig::default()
        };
        let err = Settings::resolve(file, full_env()).unwrap_err();
        match err {
            ConfigError::InvalidValue { name, .. } => assert_eq!(name, "request_timeout_secs"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_env_timeout_replaces_zero_in_file() {
        let file = FileConfig {
            request_timeout_secs: Some(0),
            ..FileConfig::default()
        };
        let lookup = |name: &str| match name {
            "CONFLUENCE_TIMEOUT_SECS" => Some("5".to_string()),
            other => full_env()(other),
        };
        let settings = Settings::resolve(file, lookup).unwrap();
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = Settings::resolve(
            FileConfig::default(),
            env_of(&[
                ("APPS_FOLDER", "/srv/apps"),
                ("CONFLUENCE_PAGE", "wiki.example.com"),
                ("CONFLUENCE_API_KEY", "token"),
            ]),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_file_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
apps_folder = "/srv/apps"
confluence_url = "https://wiki.example.com"
role_keywords = ["Lead Developer:", "Developer:"]
"#,
        )
        .unwrap();

        let file = FileConfig::from_file(&config_path).unwrap();
        assert_eq!(file.apps_folder, Some(PathBuf::from("/srv/apps")));
        assert_eq!(file.confluence_api_key, None);
        assert_eq!(
            file.role_keywords,
            Some(vec!["Lead Developer:".to_string(), "Developer:".to_string()])
        );
    }

    #[test]
    fn test_file_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "apps_folder = [").unwrap();

        let err = FileConfig::from_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_masked_api_key() {
        let settings = Settings::resolve(FileConfig::default(), full_env()).unwrap();
        assert_eq!(settings.masked_api_key(), "•••••••••••••1234");
    }
}
