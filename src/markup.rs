//! Role lookup inside Confluence page markup.
//!
//! Pages describe their owners in a table where a header cell holds the role
//! label and the next data cell embeds a user reference:
//!
//! ```html
//! <table><tr>
//!   <th>Developer:</th>
//!   <td><ri:user ri:userkey="ff8080814a1b2c3d"/></td>
//! </tr></table>
//! ```
//!
//! The query runs in three steps: header by exact text, following `td`
//! sibling, then the user-reference element inside that cell.

use scraper::{ElementRef, Html, Selector};

use crate::constants;
use crate::errors::ConfluenceError;

/// Opaque Confluence user identifier extracted from markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserKey(pub String);

impl UserKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Element and attribute carrying a user key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRefSpec {
    pub element: &'static str,
    pub attribute: &'static str,
}

impl UserRefSpec {
    /// Confluence storage format: `<ri:user ri:userkey="..."/>`.
    pub const CONFLUENCE: UserRefSpec = UserRefSpec {
        element: constants::markup::USER_REF_ELEMENT,
        attribute: constants::markup::USER_KEY_ATTRIBUTE,
    };
}

impl Default for UserRefSpec {
    fn default() -> Self {
        Self::CONFLUENCE
    }
}

/// A match of one role keyword in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMatch {
    pub keyword: String,
    pub key: UserKey,
}

/// Parsed page markup, ready for role queries.
pub struct PageDocument {
    html: Html,
    user_ref: UserRefSpec,
}

impl PageDocument {
    pub fn parse(markup: &str) -> Self {
        Self::parse_with(markup, UserRefSpec::default())
    }

    pub fn parse_with(markup: &str, user_ref: UserRefSpec) -> Self {
        Self {
            html: Html::parse_document(markup),
            user_ref,
        }
    }

    /// Try each keyword in order and return the first one that yields a user key.
    ///
    /// Returns `Ok(None)` when no keyword matches.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Parse`] naming the keyword when its header
    /// exists but the row around it is malformed.
    pub fn find_first<S: AsRef<str>>(
        &self,
        keywords: &[S],
    ) -> Result<Option<RoleMatch>, ConfluenceError> {
        for keyword in keywords {
            let keyword = keyword.as_ref();
            if let Some(key) = self.find_user_key(keyword)? {
                return Ok(Some(RoleMatch {
                    keyword: keyword.to_string(),
                    key,
                }));
            }
        }
        Ok(None)
    }

    /// Look up the user key for a single role label.
    pub fn find_user_key(&self, keyword: &str) -> Result<Option<UserKey>, ConfluenceError> {
        let header_sel = Selector::parse("th").map_err(|e| parse_error(keyword, e.to_string()))?;

        let Some(header) = self
            .html
            .select(&header_sel)
            .find(|th| th.text().collect::<String>() == keyword)
        else {
            return Ok(None);
        };

        let cell = next_data_cell(header)
            .ok_or_else(|| parse_error(keyword, "header has no following data cell"))?;

        let Some(user_ref) = cell
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == self.user_ref.element)
        else {
            return Ok(None);
        };

        match user_ref.value().attr(self.user_ref.attribute) {
            Some(key) if !key.trim().is_empty() => Ok(Some(UserKey(key.to_string()))),
            _ => Err(parse_error(
                keyword,
                format!(
                    "<{}> element has no {} attribute",
                    self.user_ref.element, self.user_ref.attribute
                ),
            )),
        }
    }
}

fn next_data_cell(header: ElementRef<'_>) -> Option<ElementRef<'_>> {
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "td")
}

fn parse_error(keyword: &str, message: impl Into<String>) -> ConfluenceError {
    ConfluenceError::Parse {
        keyword: keyword.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERIC: UserRefSpec = UserRefSpec {
        element: "user-ref",
        attribute: "key",
    };

    fn page(rows: &str) -> String {
        format!("<html><body><table><tbody>{rows}</tbody></table></body></html>")
    }

    #[test]
    fn test_find_user_key_confluence_markup() {
        let markup = page(
            r#"<tr><th>Developer:</th><td><ri:user ri:userkey="abc123"/></td></tr>"#,
        );
        let doc = PageDocument::parse(&markup);
        let key = doc.find_user_key("Developer:").unwrap();
        assert_eq!(key, Some(UserKey("abc123".to_string())));
    }

    #[test]
    fn test_find_user_key_generic_markup() {
        let markup = r#"<table><tr><th>Developer:</th><td><user-ref key="U1"/></td></tr></table>"#;
        let doc = PageDocument::parse_with(markup, GENERIC);
        assert_eq!(
            doc.find_user_key("Developer:").unwrap(),
            Some(UserKey("U1".to_string()))
        );
    }

    #[test]
    fn test_header_text_must_match_exactly() {
        let markup = page(
            r#"<tr><th>Main Developer:</th><td><ri:user ri:userkey="k1"/></td></tr>"#,
        );
        let doc = PageDocument::parse(&markup);
        assert_eq!(doc.find_user_key("Developer:").unwrap(), None);
        assert_eq!(doc.find_user_key("developer:").unwrap(), None);
        assert!(doc.find_user_key("Main Developer:").unwrap().is_some());
    }

    #[test]
    fn test_header_text_nested_in_paragraph() {
        let markup = page(
            r#"<tr><th><p>Developer:</p></th><td><p><ri:user ri:userkey="k2"/></p></td></tr>"#,
        );
        let doc = PageDocument::parse(&markup);
        assert_eq!(
            doc.find_user_key("Developer:").unwrap(),
            Some(UserKey("k2".to_string()))
        );
    }

    #[test]
    fn test_missing_data_cell_is_parse_error() {
        let markup = page("<tr><th>Developer:</th></tr>");
        let doc = PageDocument::parse(&markup);
        let err = doc.find_user_key("Developer:").unwrap_err();
        match err {
            ConfluenceError::Parse { keyword, .. } => assert_eq!(keyword, "Developer:"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_cell_is_no_match() {
        let markup = page("<tr><th>Developer:</th><td>vacant</td></tr>");
        let doc = PageDocument::parse(&markup);
        assert_eq!(doc.find_user_key("Developer:").unwrap(), None);
    }

    #[test]
    fn test_user_ref_without_key_is_parse_error() {
        let markup = page(r#"<tr><th>Developer:</th><td><ri:user ri:username="x"/></td></tr>"#);
        let doc = PageDocument::parse(&markup);
        let err = doc.find_user_key("Developer:").unwrap_err();
        assert!(err.to_string().contains("Developer:"));
        assert!(err.to_string().contains("ri:userkey"));
    }

    #[test]
    fn test_find_first_respects_keyword_order() {
        let markup = page(
            r#"<tr><th>Main Developer:</th><td><ri:user ri:userkey="main"/></td></tr>
               <tr><th>Developer:</th><td><ri:user ri:userkey="dev"/></td></tr>"#,
        );
        let doc = PageDocument::parse(&markup);

        let found = doc.find_first(&["Developer:", "Main Developer:"]).unwrap().unwrap();
        assert_eq!(found.keyword, "Developer:");
        assert_eq!(found.key.as_str(), "dev");

        let found = doc.find_first(&["Main Developer:", "Developer:"]).unwrap().unwrap();
        assert_eq!(found.key.as_str(), "main");
    }

    #[test]
    fn test_find_first_falls_through_to_next_keyword() {
        let markup = page(
            r#"<tr><th>Main Developer:</th><td><ri:user ri:userkey="main"/></td></tr>"#,
        );
        let doc = PageDocument::parse(&markup);
        let found = doc.find_first(constants::markup::MAIN_DEVELOPER_KEYWORDS).unwrap();
        assert_eq!(found.map(|m| m.keyword), Some("Main Developer:".to_string()));
    }

    #[test]
    fn test_first_match_short_circuits_later_malformed_rows() {
        // The second keyword's row is malformed, but it is never evaluated.
        let markup = page(
            r#"<tr><th>Developer:</th><td><ri:user ri:userkey="dev"/></td></tr>
               <tr><th>Owner:</th></tr>"#,
        );
        let doc = PageDocument::parse(&markup);
        let found = doc.find_first(&["Developer:", "Owner:"]).unwrap();
        assert!(found.is_some());
        assert!(doc.find_first(&["Owner:", "Developer:"]).is_err());
    }

    #[test]
    fn test_find_first_no_match() {
        let doc = PageDocument::parse("<p>No table here</p>");
        assert_eq!(doc.find_first(&["Developer:"]).unwrap(), None);
    }
}
