//! Helpers for turning `anyhow` chains into the lines the CLI prints.

use anyhow::Error;

use crate::errors::ConfluenceError;

/// Join an error and all of its causes with " → ", outermost first.
///
/// ```
/// use app_checker::error::format_error_chain;
///
/// let err = anyhow::anyhow!("connection refused")
///     .context("fetching page app_195")
///     .context("confluence check failed");
/// assert_eq!(
///     format_error_chain(&err),
///     "confluence check failed → fetching page app_195 → connection refused"
/// );
/// ```
pub fn format_error_chain(error: &Error) -> String {
    error
        .chain()
        .map(|cause| cause.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Find the first [`ConfluenceError`] anywhere in the chain.
pub fn find_confluence_error(error: &Error) -> Option<&ConfluenceError> {
    error.chain().find_map(|cause| cause.downcast_ref::<ConfluenceError>())
}
