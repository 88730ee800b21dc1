//! App folder discovery.
//!
//! Apps live in folders named `<numericId>_<name>` under a single root.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::errors::FolderError;

/// A local app project folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFolder {
    /// Folder name, e.g. `195_Billing`.
    pub name: String,
    pub path: PathBuf,
    /// Numeric id taken from the folder name, if it has one.
    pub app_id: Option<String>,
}

impl AppFolder {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let app_id = extract_app_id(&name);
        Self { name, path, app_id }
    }

    /// Confluence page identifier for this app, e.g. `app_195`.
    pub fn page_id(&self) -> Option<String> {
        self.app_id.as_deref().map(page_id_for)
    }
}

/// Extract the first run of digits from a folder name.
pub fn extract_app_id(folder_name: &str) -> Option<String> {
    let re = Regex::new(constants::apps::APP_ID_PATTERN).ok()?;
    re.find(folder_name).map(|m| m.as_str().to_string())
}

pub fn page_id_for(app_id: &str) -> String {
    format!("{}{}", constants::apps::PAGE_ID_PREFIX, app_id)
}

/// List the directories under `root` whose name contains `query`, sorted by name.
pub fn scan_apps_folder(root: &Path, query: &str) -> Result<Vec<AppFolder>, FolderError> {
    if !root.is_dir() {
        return Err(FolderError::NotFound(root.display().to_string()));
    }

    let unreadable = |e: std::io::Error| FolderError::Unreadable {
        path: root.display().to_string(),
        message: e.to_string(),
    };

    let mut matches = Vec::new();
    for entry in fs::read_dir(root).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().contains(query) {
            matches.push(AppFolder::new(path));
        }
    }

    matches.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(matches)
}
