use std::path::PathBuf;

use super::*;

#[test]
fn access_error_displays_path() {
    let err = VeriscanError::Access {
        path: PathBuf::from("/tmp/missing.csv"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert!(err.to_string().contains("/tmp/missing.csv"));
}

#[test]
fn is_access_only_for_access_variant() {
    let access = VeriscanError::Access {
        path: PathBuf::from("x"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(access.is_access());

    let config = VeriscanError::Config("bad".to_string());
    assert!(!config.is_access());
    assert!(!VeriscanError::Cancelled.is_access());
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    let err: VeriscanError = io.into();
    assert!(matches!(err, VeriscanError::Io(_)));
}

#[test]
fn config_error_message() {
    let err = VeriscanError::Config("workers must be positive".to_string());
    assert_eq!(
        err.to_string(),
        "Configuration error: workers must be positive"
    );
}
