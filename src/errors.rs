use thiserror::Error;

/// Errors that can occur when talking to Confluence or reading its pages.
#[derive(Error, Debug)]
pub enum ConfluenceError {
    #[error("Confluence configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("Failed to fetch Confluence page {page_id}: {message}")]
    Network { page_id: String, message: String },
    #[error("Error parsing page markup for {keyword}: {message}")]
    Parse { keyword: String, message: String },
    #[error("Failed to get username for key {key}: {message}")]
    Lookup { key: String, message: String },
    /// The user endpoint answered, but not with a user document.
    #[error("Unexpected user lookup response for key {key}: {message}")]
    InvalidResponse { key: String, message: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl ConfluenceError {
    /// Whether the error came from the transport rather than from the page itself.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Lookup { .. })
    }
}

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingValues(Vec<String>),
    #[error("Invalid configuration value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

/// Errors that can occur while scanning the apps folder.
#[derive(Error, Debug)]
pub enum FolderError {
    #[error("Apps folder not found: {0}")]
    NotFound(String),
    #[error("Could not read apps folder {path}: {message}")]
    Unreadable { path: String, message: String },
}

/// Errors that can occur during validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Base URL validation failed: {0}")]
    BaseUrl(String),
    #[error("API token validation failed: {0}")]
    Token(String),
    #[error("Role keyword validation failed: {0}")]
    RoleKeyword(String),
}
