//! Application constants for Confluence endpoints, markup conventions, and environment names.
//!
//! This module contains all constant values used throughout the application,
//! including REST API paths, the markup element carrying user keys, and request limits.

/// Confluence REST API constants.
pub mod api {
    /// Path (relative to the base URL) of the user lookup endpoint.
    pub const USER_LOOKUP_PATH: &str = "/rest/api/latest/user";

    /// Query parameter carrying the user key on the lookup endpoint.
    pub const USER_KEY_PARAM: &str = "key";

    /// Timeout applied to every request, in seconds.
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Returned when the lookup response carries no `username` field.
    pub const USERNAME_NOT_FOUND: &str = "Username not found";
}

/// Confluence storage-format markup conventions.
pub mod markup {
    /// Element embedding a reference to a Confluence user.
    pub const USER_REF_ELEMENT: &str = "ri:user";

    /// Attribute of [`USER_REF_ELEMENT`] holding the user key.
    pub const USER_KEY_ATTRIBUTE: &str = "ri:userkey";

    /// Role labels tried, in order, when looking up the main developer.
    pub const MAIN_DEVELOPER_KEYWORDS: &[&str] = &["Developer:", "Main Developer:"];
}

/// App folder naming conventions.
pub mod apps {
    /// Prefix prepended to the numeric app id to build a page identifier.
    pub const PAGE_ID_PREFIX: &str = "app_";

    /// Pattern matching the numeric app id inside a folder name.
    pub const APP_ID_PATTERN: &str = r"\d+";
}

/// Environment variable names.
pub mod env {
    pub const APPS_FOLDER: &str = "APPS_FOLDER";
    pub const CONFLUENCE_PAGE: &str = "CONFLUENCE_PAGE";
    pub const CONFLUENCE_API_KEY: &str = "CONFLUENCE_API_KEY";
    pub const CONFLUENCE_TIMEOUT_SECS: &str = "CONFLUENCE_TIMEOUT_SECS";
    pub const CONFIG_PATH: &str = "CONFIG_PATH";
}

/// Directory name used under XDG config locations.
pub const APP_DIR_NAME: &str = "app-checker";
