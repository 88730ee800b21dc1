#[test]
fn test_error_enum_display_messages() {
    use app_checker::errors::{ConfigError, ConfluenceError, FolderError, ValidationError};

    let c1 = ConfluenceError::ConfigurationMissing("Confluence URL or API key not configured.".to_string());
    assert!(c1.to_string().contains("configuration missing"));

    let c2 = ConfluenceError::Network {
        page_id: "app_195".to_string(),
        message: "timed out".to_string(),
    };
    assert_eq!(c2.to_string(), "Failed to fetch Confluence page app_195: timed out");

    let c3 = ConfluenceError::Parse {
        keyword: "Developer:".to_string(),
        message: "header has no following data cell".to_string(),
    };
    assert!(c3.to_string().contains("Developer:"));

    let c4 = ConfluenceError::Lookup {
        key: "ff808081".to_string(),
        message: "HTTP status 500".to_string(),
    };
    assert_eq!(
        c4.to_string(),
        "Failed to get username for key ff808081: HTTP status 500"
    );

    let m = ConfigError::MissingValues(vec![
        "APPS_FOLDER".to_string(),
        "CONFLUENCE_API_KEY".to_string(),
    ]);
    assert_eq!(
        m.to_string(),
        "Missing required configuration: APPS_FOLDER, CONFLUENCE_API_KEY"
    );

    let f = FolderError::NotFound("/srv/apps".to_string());
    assert_eq!(f.to_string(), "Apps folder not found: /srv/apps");

    let v = ValidationError::Token("empty".to_string());
    assert!(v.to_string().contains("API token validation failed"));
}

#[test]
fn test_network_classification() {
    use app_checker::errors::ConfluenceError;

    assert!(
        ConfluenceError::Network {
            page_id: "p".to_string(),
            message: "m".to_string()
        }
        .is_network()
    );
    assert!(
        ConfluenceError::Lookup {
            key: "k".to_string(),
            message: "m".to_string()
        }
        .is_network()
    );
    assert!(
        !ConfluenceError::Parse {
            keyword: "k".to_string(),
            message: "m".to_string()
        }
        .is_network()
    );
    assert!(
        !ConfluenceError::InvalidResponse {
            key: "k".to_string(),
            message: "m".to_string()
        }
        .is_network()
    );
    assert!(!ConfluenceError::ConfigurationMissing("x".to_string()).is_network());
}
