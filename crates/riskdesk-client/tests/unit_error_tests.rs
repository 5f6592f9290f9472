//! Unit tests for ClientError types and error handling

use riskdesk_client::{ClientError, ConfigError};

#[test]
fn test_error_status_display() {
    let error = ClientError::Status {
        status: 409,
        message: "Rule already exists".to_string(),
    };

    assert_eq!(error.to_string(), "Server returned 409: Rule already exists");
    assert_eq!(error.server_message(), Some("Rule already exists"));
}

#[test]
fn test_error_status_without_message() {
    let error = ClientError::Status {
        status: 502,
        message: String::new(),
    };

    assert!(error.server_message().is_none());
}

#[test]
fn test_error_validation_display() {
    let error = ClientError::Validation("Please select a CSV file: a.txt".to_string());

    assert_eq!(error.to_string(), "Please select a CSV file: a.txt");
    assert!(error.server_message().is_none());
}

#[test]
fn test_error_transport_display() {
    let error = ClientError::Transport("connection refused".to_string());

    assert_eq!(error.to_string(), "Transport error: connection refused");
}

#[test]
fn test_error_cancelled() {
    let error = ClientError::Cancelled;

    assert_eq!(error.to_string(), "Request cancelled");
    assert!(error.is_cancelled());
}

#[test]
fn test_error_from_io() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: ClientError = io_error.into();

    match error {
        ClientError::Io(_) => {}
        _ => panic!("Expected Io error"),
    }
}

#[test]
fn test_error_from_config() {
    let error: ClientError = ConfigError::MissingField {
        field: "base_url".to_string(),
    }
    .into();

    assert_eq!(
        error.to_string(),
        "Configuration error: base_url must be set"
    );
}

#[test]
fn test_error_from_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: ClientError = json_err.into();

    assert!(matches!(error, ClientError::Decode(_)));
}
