use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::constants;
use crate::errors::ConfluenceError;
use crate::markup::{PageDocument, UserKey, UserRefSpec};

/// Connection details for a Confluence instance.
#[derive(Debug, Clone)]
pub struct ConfluenceConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ConfluenceConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(constants::api::REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A fetched Confluence page.
///
/// The markup is fetched once on construction and never refreshed.
#[derive(Debug, Clone)]
pub struct PageHandle {
    page_id: String,
    markup: Option<String>,
}

impl PageHandle {
    /// Build a handle from markup that is already in hand.
    pub fn from_markup(page_id: impl Into<String>, markup: impl Into<String>) -> Self {
        let markup = markup.into();
        Self {
            page_id: page_id.into(),
            markup: (!markup.trim().is_empty()).then_some(markup),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }
}

pub struct ConfluenceClient {
    http: Client,
    base_url: String,
    api_key: String,
    user_ref: UserRefSpec,
}

impl ConfluenceClient {
    /// Create a client, failing fast when the base URL or API key is missing.
    pub fn new(config: ConfluenceConfig) -> Result<Self, ConfluenceError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        let api_key = config.api_key.trim().to_string();

        if base_url.is_empty() || api_key.is_empty() {
            return Err(ConfluenceError::ConfigurationMissing(
                "Confluence URL or API key not configured.".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfluenceError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            api_key,
            user_ref: UserRefSpec::default(),
        })
    }

    /// Use a different element/attribute pair for user references.
    pub fn with_user_ref(mut self, user_ref: UserRefSpec) -> Self {
        self.user_ref = user_ref;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw markup of `{base_url}/{page_id}`.
    ///
    /// An empty body yields a handle without markup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Network`] if the request cannot be sent,
    /// times out, answers with a non-2xx status, or the body cannot be read.
    pub async fn fetch_page(&self, page_id: &str) -> Result<PageHandle, ConfluenceError> {
        let url = format!("{}/{}", self.base_url, page_id.trim_start_matches('/'));
        let network_error = |message: String| ConfluenceError::Network {
            page_id: page_id.to_string(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| network_error(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| network_error(e.to_string()))?;

        Ok(PageHandle::from_markup(page_id, body))
    }

    /// Resolve the first role label found on the page to a username.
    ///
    /// Keywords are tried in order and the first one with a user key wins.
    /// Returns `Ok(None)` when no keyword matches, without a second request.
    ///
    /// # Errors
    ///
    /// - [`ConfluenceError::Parse`] if a matching header has no data cell, or
    ///   its user reference carries no key
    /// - any error of [`Self::username_by_user_key`] for the matched key
    pub async fn resolve_role<S: AsRef<str>>(
        &self,
        page: &PageHandle,
        keywords: &[S],
    ) -> Result<Option<String>, ConfluenceError> {
        let Some(markup) = page.markup() else {
            return Ok(None);
        };

        let found = PageDocument::parse_with(markup, self.user_ref).find_first(keywords)?;

        match found {
            Some(role) => self.username_by_user_key(&role.key).await.map(Some),
            None => Ok(None),
        }
    }

    /// Look up the main developer listed on the page.
    pub async fn main_developer(&self, page: &PageHandle) -> Result<Option<String>, ConfluenceError> {
        self.resolve_role(page, constants::markup::MAIN_DEVELOPER_KEYWORDS)
            .await
    }

    /// Resolve a user key to the account's username.
    ///
    /// A response without a string `username` field resolves to
    /// `"Username not found"`.
    ///
    /// # Errors
    ///
    /// - [`ConfluenceError::Lookup`] on transport failure or a non-2xx status
    /// - [`ConfluenceError::InvalidResponse`] if the body is not JSON
    pub async fn username_by_user_key(&self, key: &UserKey) -> Result<String, ConfluenceError> {
        let url = format!("{}{}", self.base_url, constants::api::USER_LOOKUP_PATH);
        let lookup_error = |message: String| ConfluenceError::Lookup {
            key: key.as_str().to_string(),
            message,
        };

        let response = self
            .http
            .get(&url)
            .query(&[(constants::api::USER_KEY_PARAM, key.as_str())])
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| lookup_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(lookup_error(describe_status(status)));
        }

        let details: Value = response
            .json()
            .await
            .map_err(|e| ConfluenceError::InvalidResponse {
                key: key.as_str().to_string(),
                message: e.to_string(),
            })?;

        Ok(username_from(&details))
    }
}

/// The `username` field of a user lookup response, or the not-found literal.
fn username_from(details: &Value) -> String {
    details
        .get("username")
        .and_then(Value::as_str)
        .unwrap_or(constants::api::USERNAME_NOT_FOUND)
        .to_string()
}

fn describe_status(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("HTTP status {} {}", status.as_u16(), reason),
        None => format!("HTTP status {}", status.as_u16()),
    }
}
